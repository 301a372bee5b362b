/*
 * Responsibility
 * - GET /hello: greet the authenticated caller in text/plain
 * - Identity arrives as an explicit argument from the extractor; no auth logic here
 * - Returns a bare String: axum serves it as text/plain; charset=utf-8
 */
use crate::{api::extractors::IdentityExtractor, error::AppError, services::greeting};

pub async fn hello(IdentityExtractor(identity): IdentityExtractor) -> Result<String, AppError> {
    Ok(greeting::greet(&identity)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::extractors::AuthenticatedIdentity;

    #[tokio::test]
    async fn greets_identity_passed_by_extractor() {
        let identity = AuthenticatedIdentity::new("alice", "00u1");

        let body = hello(IdentityExtractor(identity)).await.unwrap();
        assert_eq!(body, "Hello, alice!");
    }

    #[tokio::test]
    async fn empty_principal_becomes_invalid_identity() {
        let identity = AuthenticatedIdentity::new("", "00u1");

        let err = hello(IdentityExtractor(identity)).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidIdentity));
    }
}

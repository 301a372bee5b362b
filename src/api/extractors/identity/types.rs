/*
 * Responsibility
 * - The "authenticated caller" type handlers see
 * - The auth middleware verifies the token and stores it in request extensions;
 *   handlers receive only this type
 *
 * Notes
 * - JWT verification lives in middleware/services
 * - Kept as a fixed contract so handler code never touches raw claims
 */

/// Caller resolved by the authentication middleware for a single request.
///
/// - `principal_name` is what the caller is greeted as (`upn`, `preferred_username` or `sub`)
/// - `subject` is the raw `sub` claim
/// - `token_id` is the `jti`, kept for log correlation only
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    pub principal_name: String,
    pub subject: String,
    pub token_id: Option<String>,
}

impl AuthenticatedIdentity {
    pub fn new(principal_name: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            principal_name: principal_name.into(),
            subject: subject.into(),
            token_id: None,
        }
    }

    pub fn with_token_id(mut self, token_id: Option<String>) -> Self {
        self.token_id = token_id;
        self
    }
}

/// Factory: build `AuthService` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::{AccessJwtError, AuthService};

pub fn build_auth_service(config: &Config) -> Result<Arc<AuthService>, AccessJwtError> {
    let auth = AuthService::new(
        &config.access_jwt_public_key_pem,
        config.access_jwt_algorithm,
        &config.auth_issuer,
        &config.auth_audience,
        config.access_token_leeway_seconds,
    )
    .inspect_err(|err| {
        tracing::error!(error = %err, "failed to build access token verifier");
    })?;

    Ok(Arc::new(auth))
}

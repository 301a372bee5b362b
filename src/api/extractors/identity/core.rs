use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::state::AppState;

use super::AuthenticatedIdentity;

/// Extractor handing the `AuthenticatedIdentity` to a handler as a plain argument.
/// Assumes the access middleware already inserted it into request extensions.
/// Missing identity means the route is not behind the middleware: answer 401.
pub struct IdentityExtractor(pub AuthenticatedIdentity);

impl FromRequestParts<AppState> for IdentityExtractor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedIdentity>()
            .cloned()
            .map(IdentityExtractor)
            .ok_or(AppError::Unauthorized)
    }
}

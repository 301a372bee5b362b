//! Bearer access token (JWT) verification → `AuthenticatedIdentity` in request extensions.
//!
//! - `Authorization: Bearer <jwt>` is required; the scheme is matched case-insensitively.
//! - Signature, `iss`/`aud`/`exp`/`nbf` and claim checks are done by `AuthService`.
//! - Any failure is a 401 and the wrapped handler never runs.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::extractors::AuthenticatedIdentity;
use crate::error::AppError;
use crate::state::AppState;

/// Require authentication on every route of `router`.
///
/// Applied as a `route_layer`, so unmatched paths still answer 404 rather than 401.
///
/// ```ignore
/// let protected = Router::new().route("/hello", get(hello));
/// let protected = middleware::auth::access::apply(protected, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 from_fn cannot take a State extractor, so pass state with `from_fn_with_state`
    router.route_layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let Some(token) = bearer_token(req.headers()) else {
        tracing::warn!("missing or malformed bearer credential");
        return Err(AppError::Unauthorized);
    };

    let verified = match state.auth.verify_verified(token) {
        Ok(verified) => verified,
        Err(err) => {
            tracing::warn!(
                error = %err,
                "access token verification failed"
            );
            return Err(AppError::Unauthorized);
        }
    };

    tracing::debug!(
        principal = %verified.principal_name,
        jti = ?verified.jti,
        "request authenticated"
    );

    let identity = AuthenticatedIdentity::new(verified.principal_name, verified.subject)
        .with_token_id(verified.jti);

    // middleware → extractor handoff
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

/// Token part of `Authorization: Bearer <token>`, if present and well-formed.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

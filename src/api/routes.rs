/*
 * Responsibility
 * - URL structure of the service
 * - Explicit registration: method + path → handler, with the auth middleware wrapped
 *   around the protected group only
 */
use axum::{Router, routing::get};

use crate::api::handlers::{health::health, hello::hello};
use crate::middleware;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/hello", get(hello))
        .route("/hello/", get(hello));
    let protected = middleware::auth::access::apply(protected, state);

    Router::new().route("/health", get(health)).merge(protected)
}

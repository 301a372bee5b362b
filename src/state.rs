/*
 * Responsibility
 * - Shared context bound to the Router (AppState)
 *   - auth: the access token verifier
 * - Clone-cheap by construction (Arc inside), never mutated after startup
 */
use std::sync::Arc;

use crate::services::auth::AuthService;

#[derive(Clone, Debug)]
pub struct AppState {
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(auth: Arc<AuthService>) -> Self {
        Self { auth }
    }
}

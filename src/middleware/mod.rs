/*
 * Responsibility
 * - Public interface of the middleware layers
 * - Each module exposes `apply(router, ..)` so app.rs composes them explicitly
 */
pub mod auth;
pub mod cors;
pub mod http;
pub mod security_headers;

/*
 * Responsibility
 * - HTTP surface: routes, handlers, extractors
 * - Re-export routes() for app.rs
 */
pub mod extractors;
pub mod handlers;
mod routes;

pub use routes::routes;

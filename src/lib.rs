//! Authenticated greeting service.
//!
//! `GET /hello` answers `Hello, <principal>!` for callers presenting a valid bearer JWT.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;

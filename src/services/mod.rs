pub mod auth;
pub mod greeting;

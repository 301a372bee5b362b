//! Shared helpers for router-level tests.

#![allow(dead_code)]

use std::collections::HashMap;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use http_body_util::BodyExt;
use jsonwebtoken::{Algorithm, EncodingKey, Header, get_current_timestamp};
use serde_json::{Value, json};

use hello_jwt::app::build_router;
use hello_jwt::config::Config;
use hello_jwt::services::auth::build_auth_service;
use hello_jwt::state::AppState;

pub const PRIVATE_PEM: &str = include_str!("../fixtures/ed25519_private.pem");
pub const PUBLIC_PEM: &str = include_str!("../fixtures/ed25519_public.pem");
pub const UNTRUSTED_PRIVATE_PEM: &str = include_str!("../fixtures/ed25519_untrusted_private.pem");

pub const ISSUER: &str = "https://issuer.example.com/oauth2/default";
pub const AUDIENCE: &str = "api://default";

pub fn test_config() -> Config {
    let vars = HashMap::from([
        ("AUTH_ISSUER", ISSUER.to_string()),
        ("AUTH_AUDIENCE", AUDIENCE.to_string()),
        ("ACCESS_JWT_PUBLIC_KEY_PEM", PUBLIC_PEM.to_string()),
        ("ACCESS_TOKEN_LEEWAY_SECONDS", "5".to_string()),
    ]);
    Config::from_lookup(|key| vars.get(key).cloned()).unwrap()
}

/// Full router exactly as `app::run` builds it.
pub fn test_app() -> Router {
    let config = test_config();
    let state = AppState::new(build_auth_service(&config).unwrap());
    build_router(state, &config)
}

pub fn claims(sub: &str) -> Value {
    let now = get_current_timestamp();
    json!({
        "iss": ISSUER,
        "aud": AUDIENCE,
        "sub": sub,
        "iat": now,
        "exp": now + 600,
        "jti": "test-token",
    })
}

pub fn sign_with(pem: &str, claims: &Value) -> String {
    let key = EncodingKey::from_ed_pem(pem.as_bytes()).unwrap();
    jsonwebtoken::encode(&Header::new(Algorithm::EdDSA), claims, &key).unwrap()
}

pub fn sign(claims: &Value) -> String {
    sign_with(PRIVATE_PEM, claims)
}

pub fn get(uri: &str, authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

//! CORS for browser callers of `GET /hello`.
//!
//! - Development: any origin, no credentials.
//! - Production: exact-match allowlist from `Config::cors_allowed_origins`, no credentials.
//!   With an empty allowlist no CORS layer is installed at all.
//!
//! The bearer token travels in `Authorization`, so browsers always preflight.

use std::time::Duration;

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::Config;

const REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

pub fn apply(router: Router, config: &Config) -> Router {
    match cors_layer(config) {
        Some(cors) => router.layer(cors),
        None => router,
    }
}

/// `None` when production has no allowed origin.
fn cors_layer(config: &Config) -> Option<CorsLayer> {
    let allow_origin = if config.app_env.is_production() {
        let allowed: Vec<HeaderValue> = config
            .cors_allowed_origins
            .iter()
            // A literal `*` is not an origin; the list form rejects it
            .filter(|s| s.as_str() != "*")
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();
        if allowed.is_empty() {
            return None;
        }
        AllowOrigin::list(allowed)
    } else {
        AllowOrigin::from(Any)
    };

    Some(
        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods([Method::GET])
            .allow_headers([header::AUTHORIZATION, header::ACCEPT, REQUEST_ID])
            // Lets browser callers correlate a response with server logs
            .expose_headers([REQUEST_ID])
            .max_age(Duration::from_secs(60 * 10)),
    )
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request, routing::get};
    use tower::ServiceExt;

    use super::*;

    fn config(env: &str, origins: &str) -> Config {
        let vars = [
            ("APP_ENV", env),
            ("CORS_ALLOWED_ORIGINS", origins),
            ("AUTH_ISSUER", "https://issuer.example.com"),
            ("AUTH_AUDIENCE", "api://default"),
            ("ACCESS_JWT_PUBLIC_KEY_PEM", "unused"),
        ];
        Config::from_lookup(|key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        })
        .unwrap()
    }

    fn app(config: &Config) -> Router {
        apply(Router::new().route("/hello", get(|| async { "hi" })), config)
    }

    fn preflight(origin: &str) -> Request<Body> {
        Request::options("/hello")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "authorization")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn production_echoes_only_allowlisted_origins() {
        let app = app(&config("production", "https://app.example.com"));

        let res = app
            .clone()
            .oneshot(preflight("https://app.example.com"))
            .await
            .unwrap();
        assert_eq!(
            res.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://app.example.com"
        );

        let res = app.oneshot(preflight("https://evil.example.com")).await.unwrap();
        assert!(res.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }

    #[tokio::test]
    async fn development_allows_any_origin_and_exposes_request_id() {
        let app = app(&config("development", ""));

        let res = app
            .oneshot(
                Request::get("/hello")
                    .header(header::ORIGIN, "http://localhost:3000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            res.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
        assert_eq!(
            res.headers()
                .get(header::ACCESS_CONTROL_EXPOSE_HEADERS)
                .unwrap(),
            "x-request-id"
        );
    }

    #[test]
    fn production_without_allowlist_installs_no_layer() {
        assert!(cors_layer(&config("production", "")).is_none());
        assert!(cors_layer(&config("production", "https://app.example.com")).is_some());
    }
}

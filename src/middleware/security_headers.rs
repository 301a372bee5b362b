//! Response headers for a bearer-protected, plain-text API.
//!
//! Every response is personal to the caller (the greeting names the principal), so it
//! must not be cached by shared caches, and the text body must not be content-sniffed.
//! Framing and browser-feature policies are left out: nothing here renders as a page.

use axum::Router;
use axum::http::header::{self, HeaderName, HeaderValue};
use tower_http::set_header::SetResponseHeaderLayer;

const HEADERS: [(HeaderName, &str); 3] = [
    (header::CACHE_CONTROL, "no-store"),
    (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
    (header::REFERRER_POLICY, "no-referrer"),
];

/// Add [`HEADERS`] to every response that does not already carry them.
pub fn apply(router: Router) -> Router {
    HEADERS.into_iter().fold(router, |router, (name, value)| {
        router.layer(SetResponseHeaderLayer::if_not_present(
            name,
            HeaderValue::from_static(value),
        ))
    })
}

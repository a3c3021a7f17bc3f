//! CORS policy for browser clients.
//!
//! Policy:
//! - `CORS_ALLOWED_ORIGINS` set (any environment): allowlist origins, WITH credentials, so
//!   that a UI on an allowed origin can receive the session mirror cookies.
//! - Production without an allowlist: no cross-origin access (no CORS headers).
//! - Development without an allowlist: permissive (Allow-Origin: *), WITHOUT credentials.
//!   Cookies from `POST /api/v1/session` then only stick when the UI is served from the
//!   same origin.

use std::time::Duration;

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::Config;

use super::http::REQUEST_ID_HEADER;

/// Apply CORS policy to the given Router.
///
/// IMPORTANT:
/// - Do not combine wildcard origin (`Any`) with `allow_credentials(true)`.
pub fn apply(router: Router, config: &Config) -> Router {
    router.layer(layer(config))
}

fn layer(config: &Config) -> CorsLayer {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    let allowed: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|s| HeaderValue::from_str(s).ok())
        .collect();

    let cors = if !allowed.is_empty() || config.app_env.is_production() {
        // An empty allowlist allows none (no CORS headers).
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_credentials(true)
    } else {
        CorsLayer::new().allow_origin(Any)
    };

    cors.allow_methods([
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ])
    .allow_headers([
        header::AUTHORIZATION,
        header::CONTENT_TYPE,
        header::ACCEPT,
        request_id.clone(),
    ])
    .expose_headers([request_id])
    .max_age(Duration::from_secs(60 * 10))
}

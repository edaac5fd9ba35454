//! CORS policy for the browser frontend.
//!
//! Policy:
//! - Development: any origin, never with credentials.
//! - Production: exact-match allowlist from `CORS_ALLOWED_ORIGINS`. Credentials
//!   are allowed only when `CORS_ALLOW_CREDENTIALS` is set and the allowlist is
//!   non-empty.

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::Config;

/// Apply CORS policy to the given Router.
///
/// A wildcard origin (`Any`) is never combined with `allow_credentials(true)`;
/// tower-http panics on that combination.
pub fn apply(router: Router, config: &Config) -> Router {
    router.layer(layer(config))
}

fn layer(config: &Config) -> CorsLayer {
    let allowlisted = config.app_env.is_production() || !config.cors_allowed_origins.is_empty();

    let cors = if allowlisted {
        // An empty allowlist in production allows nothing (no CORS headers).
        let allowed: Vec<HeaderValue> = config
            .cors_allowed_origins
            .iter()
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        let allow_credentials = config.cors_allow_credentials && !allowed.is_empty();
        let allow_origin = AllowOrigin::predicate(move |origin: &HeaderValue, _req| {
            allowed.iter().any(|v| v == origin)
        });

        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_credentials(allow_credentials)
    } else {
        CorsLayer::new().allow_origin(Any)
    };

    cors.allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static("x-request-id"),
        ])
        .max_age(std::time::Duration::from_secs(60 * 10))
}

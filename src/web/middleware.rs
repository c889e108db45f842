//! CORS middleware configuration.

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

/// Create a CORS layer from configuration.
///
/// The gateway's wire contract allows GET, POST and DELETE with the
/// `Content-Type` header. When no origins are configured, any origin is
/// allowed; otherwise only the listed origins are.
pub fn create_cors_layer(origins: &[String]) -> CorsLayer {
    let methods = [Method::GET, Method::POST, Method::DELETE];

    if origins.is_empty() {
        return CorsLayer::new()
            .allow_methods(methods)
            .allow_headers([CONTENT_TYPE])
            .allow_origin(Any);
    }

    let parsed_origins: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();

    if parsed_origins.is_empty() {
        // Fallback to the permissive layer if no origin parsed
        CorsLayer::new()
            .allow_methods(methods)
            .allow_headers([CONTENT_TYPE])
            .allow_origin(Any)
    } else {
        CorsLayer::new()
            .allow_methods(methods)
            .allow_headers([CONTENT_TYPE])
            .allow_origin(parsed_origins)
    }
}

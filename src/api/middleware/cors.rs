//! CORS policy for the public API.

use axum::http::{Method, header};
use tower_http::cors::{Any, CorsLayer};

/// Creates the CORS layer.
///
/// # Policy
///
/// - `Access-Control-Allow-Origin: *`
/// - `Access-Control-Allow-Methods: GET, OPTIONS`
/// - `Access-Control-Allow-Headers: Content-Type`
///
/// Preflight `OPTIONS` requests are answered here with `200 OK` and an empty
/// body; they never reach a handler.
pub fn layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

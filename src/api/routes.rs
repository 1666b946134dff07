//! API route configuration.

use crate::api::handlers::{metadata_handler, method_not_allowed_handler};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Public API routes.
///
/// # Endpoints
///
/// - `GET /metadata` - Aggregated now-playing metadata for the requested sources
///
/// Any other method on `/metadata` gets `405` with a JSON body.
pub fn public_routes() -> Router<AppState> {
    Router::new().route(
        "/metadata",
        get(metadata_handler).fallback(method_not_allowed_handler),
    )
}

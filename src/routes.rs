//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`        - Configuration health check (public)
//! - `/api/*`              - Metadata API (public, CORS enabled)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - `*` origin, GET/OPTIONS, preflight answered without a handler
//! - **Panic recovery** - Panics become a JSON `500`
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{cors, panic, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}

/// Routes and middleware without path normalization.
///
/// Used directly by integration tests, which need a plain [`Router`].
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api::routes::public_routes())
        .with_state(state)
        .layer(panic::layer())
        .layer(cors::layer())
        .layer(tracing::layer())
}

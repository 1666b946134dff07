//! # Broadcast Metadata
//!
//! Polls station metadata-monitoring endpoints for a time window and returns a
//! per-station view of "now playing" records, each with its `title="..."`
//! string split into piece and composer.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Time windows, sources, the title parser, fetch trait
//! - **Application Layer** ([`application`]) - Concurrent aggregation across sources
//! - **Infrastructure Layer** ([`infrastructure`]) - reqwest client for the upstream gateway
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Failure Model
//!
//! - An invalid time window or unknown source rejects the request (400)
//! - A missing upstream credential rejects the request before any fetch (500)
//! - A failing or slow station only marks its own slot as failed
//!
//! ## Quick Start
//!
//! ```bash
//! export WQXR_API_KEY="..."
//! cargo run
//! curl 'http://localhost:3000/api/metadata?sources=wqxr'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::MetadataService;
    pub use crate::domain::{
        ApiKey, FetchError, MetadataFetcher, RawMetadataEntry, SourceCatalog, SourceSpec,
        TimeRange,
    };
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}

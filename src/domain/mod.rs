//! Domain layer: the metadata core.
//!
//! Everything here is independent of HTTP and configuration loading.
//!
//! # Modules
//!
//! - [`time_range`] - Validated query window ([`TimeRange::resolve`])
//! - [`source`] - Source definitions and the configured catalog
//! - [`parser`] - `title="Piece-Composer"` splitting heuristics
//! - [`metadata`] - Entries, per-source results and the aggregate
//! - [`fetcher`] - Upstream fetch trait and credential type
//! - [`error`] - Request-level and per-source error types
//!
//! # Request Flow
//!
//! 1. [`TimeRange::resolve`] validates the window (may reject the request)
//! 2. [`SourceCatalog::select`] resolves requested source ids
//! 3. [`crate::application::services::MetadataService`] fetches every source
//!    concurrently through a [`MetadataFetcher`]
//! 4. Each entry is passed through [`parser::parse`]

pub mod error;
pub mod fetcher;
pub mod metadata;
pub mod parser;
pub mod source;
pub mod time_range;

pub use error::{FetchError, MetadataError};
pub use fetcher::{ApiKey, MetadataFetcher};
pub use metadata::{AggregateResponse, MetadataEntry, ParsedMetadata, RawMetadataEntry, SourceResult};
pub use source::{CatalogError, SourceCatalog, SourceSpec};
pub use time_range::TimeRange;

#[cfg(test)]
pub use fetcher::MockMetadataFetcher;

//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod metadata;

pub use health::health_handler;
pub use metadata::{metadata_handler, method_not_allowed_handler};

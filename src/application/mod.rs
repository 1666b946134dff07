//! Application layer services implementing business logic.
//!
//! Services orchestrate the domain core: they hold the collaborators a request
//! needs (fetcher, credential, timeouts) and expose a small API to the HTTP
//! handlers and the CLI.
//!
//! # Available Services
//!
//! - [`services::metadata_service::MetadataService`] - Concurrent per-source fetch and aggregation

pub mod services;

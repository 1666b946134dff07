//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for talking to upstream services.
//!
//! # Modules
//!
//! - [`upstream`] - reqwest client for the station metadata-monitoring gateway

pub mod upstream;

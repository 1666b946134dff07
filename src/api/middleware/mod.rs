//! HTTP middleware for request processing.
//!
//! Provides CORS, panic recovery, and observability middleware.

pub mod cors;
pub mod panic;
pub mod tracing;

//! Upstream metadata gateway integration.

mod client;

pub use client::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT, UpstreamClient, decode_payload};

//! Fetch abstraction over upstream metadata endpoints.

use async_trait::async_trait;
use std::fmt;

use super::error::FetchError;
use super::metadata::RawMetadataEntry;
use super::source::SourceSpec;
use super::time_range::TimeRange;

/// Opaque upstream credential.
///
/// `Debug` never prints the key.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wraps a key; blank values count as unset.
    pub fn new(key: impl Into<String>) -> Option<Self> {
        let key = key.into();
        if key.trim().is_empty() {
            None
        } else {
            Some(Self(key))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Retrieves the raw metadata entries of one source for a time range.
///
/// # Implementations
///
/// - [`crate::infrastructure::upstream::UpstreamClient`] - HTTP client for the
///   monitoring gateway
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetadataFetcher: Send + Sync {
    /// Fetches entries in upstream order.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] on a non-2xx status, transport failure, or a
    /// payload that is not a list of objects.
    async fn fetch(
        &self,
        source: &SourceSpec,
        range: TimeRange,
        api_key: &ApiKey,
    ) -> Result<Vec<RawMetadataEntry>, FetchError>;
}

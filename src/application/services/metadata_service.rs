//! Concurrent multi-source metadata aggregation.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::domain::{
    AggregateResponse, ApiKey, FetchError, MetadataEntry, MetadataError, MetadataFetcher,
    SourceResult, SourceSpec, TimeRange,
};

/// Message returned when no upstream credential is configured.
pub const MISSING_CREDENTIAL: &str = "WQXR_API_KEY environment variable not configured";

/// Fetches, parses and aggregates metadata across sources.
///
/// Each source gets its own fetch future bounded by `fetch_timeout`; all of
/// them are polled together and every outcome, good or bad, lands in its own
/// slot of the [`AggregateResponse`].
pub struct MetadataService<F: MetadataFetcher + ?Sized> {
    fetcher: Arc<F>,
    api_key: Option<ApiKey>,
    fetch_timeout: Duration,
}

impl<F: MetadataFetcher + ?Sized> MetadataService<F> {
    /// Creates a new aggregation service.
    pub fn new(fetcher: Arc<F>, api_key: Option<ApiKey>, fetch_timeout: Duration) -> Self {
        Self {
            fetcher,
            api_key,
            fetch_timeout,
        }
    }

    /// Whether an upstream credential is available.
    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// Fetches every source for `range` and collects the results.
    ///
    /// # Ordering
    ///
    /// Results follow the order of `sources`; entries keep upstream order.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::Configuration`] when no credential is configured.
    /// This is checked before any fetch is started. Per-source failures never
    /// produce an error; they become [`SourceResult::Failure`].
    pub async fn aggregate(
        &self,
        range: TimeRange,
        sources: &[SourceSpec],
    ) -> Result<AggregateResponse, MetadataError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| MetadataError::configuration(MISSING_CREDENTIAL))?;

        info!(
            start = range.start(),
            stop = range.stop(),
            sources = sources.len(),
            "Fetching metadata"
        );

        let fetches = sources
            .iter()
            .map(|source| self.fetch_source(source, range, api_key));

        let results = join_all(fetches).await;

        let response = AggregateResponse {
            sources: sources.iter().cloned().zip(results).collect(),
            range,
            generated_at: Utc::now(),
        };

        info!(
            entries = response.entry_count(),
            failed = response.failed_count(),
            "Metadata aggregated"
        );

        Ok(response)
    }

    async fn fetch_source(
        &self,
        source: &SourceSpec,
        range: TimeRange,
        api_key: &ApiKey,
    ) -> SourceResult {
        let outcome = tokio::time::timeout(
            self.fetch_timeout,
            self.fetcher.fetch(source, range, api_key),
        )
        .await
        .unwrap_or(Err(FetchError::Timeout));

        match outcome {
            Ok(raw_entries) => {
                debug!(source = %source.id, entries = raw_entries.len(), "Source fetched");
                SourceResult::Success {
                    entries: raw_entries.into_iter().map(MetadataEntry::from_raw).collect(),
                }
            }
            Err(err) => {
                warn!(source = %source.id, error = %err, "Source fetch failed");
                SourceResult::Failure {
                    reason: err.to_string(),
                }
            }
        }
    }
}

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use broadcast_metadata::prelude::*;
use broadcast_metadata::routes::router;

/// Canned per-source outcome for [`StubFetcher`].
#[derive(Clone)]
pub enum Canned {
    Entries(Vec<Value>),
    Fail(FetchError),
    Stall,
}

/// Deterministic in-memory fetcher keyed by source id.
///
/// Sources without a canned outcome return an empty list.
#[derive(Default)]
pub struct StubFetcher {
    outcomes: HashMap<String, Canned>,
    calls: AtomicUsize,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, source_id: &str, outcome: Canned) -> Self {
        self.outcomes.insert(source_id.to_string(), outcome);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetadataFetcher for StubFetcher {
    async fn fetch(
        &self,
        source: &SourceSpec,
        _range: TimeRange,
        _api_key: &ApiKey,
    ) -> Result<Vec<RawMetadataEntry>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match self.outcomes.get(&source.id).cloned() {
            None => Ok(Vec::new()),
            Some(Canned::Entries(values)) => Ok(values
                .into_iter()
                .filter_map(|v| match v {
                    Value::Object(map) => Some(map),
                    _ => None,
                })
                .collect()),
            Some(Canned::Fail(err)) => Err(err),
            Some(Canned::Stall) => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(Vec::new())
            }
        }
    }
}

pub fn metadata_entry(ts: i64, metadata: &str) -> Value {
    json!({
        "timestamp": ts,
        "metadataString": metadata,
        "source": "monitor",
    })
}

/// Fetcher with realistic data for all default sources.
pub fn default_stub() -> StubFetcher {
    StubFetcher::new()
        .with(
            "wqxr",
            Canned::Entries(vec![
                metadata_entry(
                    1_700_000_100,
                    r#"artist="" title="Piano Sonata No. 14-Ludwig van Beethoven""#,
                ),
                metadata_entry(1_700_000_900, r#"title="Symphony No. 5-Beethoven""#),
            ]),
        )
        .with(
            "wnyc",
            Canned::Entries(vec![metadata_entry(1_700_000_200, r#"title="Morning Edition""#)]),
        )
        .with("tunein-test", Canned::Entries(vec![]))
}

pub fn create_test_state(fetcher: Arc<StubFetcher>, api_key: Option<&str>) -> AppState {
    create_test_state_with_timeout(fetcher, api_key, Duration::from_secs(5))
}

pub fn create_test_state_with_timeout(
    fetcher: Arc<StubFetcher>,
    api_key: Option<&str>,
    timeout: Duration,
) -> AppState {
    let fetcher: Arc<dyn MetadataFetcher> = fetcher;
    let service = MetadataService::new(fetcher, api_key.and_then(ApiKey::new), timeout);

    AppState::new(service, SourceCatalog::default())
}

pub fn create_test_app(fetcher: Arc<StubFetcher>) -> axum_test::TestServer {
    let state = create_test_state(fetcher, Some("test-key"));
    axum_test::TestServer::new(router(state)).unwrap()
}

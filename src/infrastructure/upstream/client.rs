//! HTTP client for the station metadata-monitoring gateway.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use serde_json::Value;
use tracing::debug;

use crate::domain::{ApiKey, FetchError, MetadataFetcher, RawMetadataEntry, SourceSpec, TimeRange};

/// Production gateway base URL.
pub const DEFAULT_BASE_URL: &str =
    "https://sbfl-prod-us-east-2-public-api-gateway.streaming.adswizz.com";

/// User agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = "WQXR-Metadata-Viewer/1.0";

/// [`MetadataFetcher`] backed by the monitoring gateway.
///
/// # Request
///
/// ```text
/// GET {base}/wnyc/stations/{id}/metadata-monitoring?start={start}&stop={stop}
/// x-api-key: <key>
/// ```
///
/// The inner `reqwest::Client` pools connections and is cheap to clone.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
    base_url: String,
    user_agent: String,
}

impl UpstreamClient {
    pub fn new(client: Client, base_url: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            user_agent: user_agent.into(),
        }
    }

    /// Monitoring endpoint for a source, without the query string.
    pub fn endpoint(&self, source: &SourceSpec) -> String {
        format!(
            "{}/wnyc/stations/{}/metadata-monitoring",
            self.base_url, source.id
        )
    }
}

#[async_trait]
impl MetadataFetcher for UpstreamClient {
    async fn fetch(
        &self,
        source: &SourceSpec,
        range: TimeRange,
        api_key: &ApiKey,
    ) -> Result<Vec<RawMetadataEntry>, FetchError> {
        let url = self.endpoint(source);
        debug!(source = %source.id, %url, "Requesting upstream metadata");

        let response = self
            .client
            .get(&url)
            .query(&[("start", range.start()), ("stop", range.stop())])
            .header("x-api-key", api_key.expose())
            .header(CONTENT_TYPE, "application/json")
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(|err| FetchError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload = response
            .json::<Value>()
            .await
            .map_err(|err| FetchError::Payload(err.to_string()))?;

        decode_payload(payload)
    }
}

/// Normalizes an upstream body into a list of entries.
///
/// - array of objects: the entries, in order
/// - single object: one entry
/// - `null`: no entries
///
/// # Errors
///
/// Returns [`FetchError::Payload`] for scalars or arrays holding non-objects.
pub fn decode_payload(payload: Value) -> Result<Vec<RawMetadataEntry>, FetchError> {
    match payload {
        Value::Null => Ok(Vec::new()),
        Value::Object(entry) => Ok(vec![entry]),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(entry) => Ok(entry),
                other => Err(FetchError::Payload(format!(
                    "entry {index} is {}, expected an object",
                    json_kind(&other)
                ))),
            })
            .collect(),
        other => Err(FetchError::Payload(format!(
            "expected an array of entries, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

//! DTOs for the metadata endpoint.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::domain::{AggregateResponse, RawMetadataEntry, SourceResult};
use crate::error::iso_timestamp;

/// Query parameters for `GET /api/metadata`.
///
/// Times stay raw strings here; [`crate::domain::TimeRange::resolve`] owns
/// their parsing so malformed values get its error message.
#[derive(Debug, Default, Deserialize)]
pub struct MetadataQuery {
    pub start: Option<String>,
    pub stop: Option<String>,
    /// Comma-separated source ids.
    pub sources: Option<String>,
}

impl MetadataQuery {
    /// Requested source ids, or `None` when every source should be queried.
    pub fn source_ids(&self) -> Option<Vec<String>> {
        let ids: Vec<String> = self
            .sources
            .as_deref()?
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect();

        (!ids.is_empty()).then_some(ids)
    }
}

/// Successful aggregation response.
#[derive(Debug, Serialize)]
pub struct MetadataResponse {
    pub success: bool,
    pub stations: Stations,
    pub metadata: ResponseMeta,
}

/// Per-station results keyed by display name, in request order.
#[derive(Debug)]
pub struct Stations(pub Vec<(String, StationResult)>);

impl Serialize for Stations {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, result) in &self.0 {
            map.serialize_entry(name, result)?;
        }
        map.end()
    }
}

/// One station's slot.
///
/// Uses untagged enum for cleaner JSON structure (the `success` flag already
/// tells the variants apart).
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum StationResult {
    Success {
        success: bool,
        #[serde(rename = "metadataList")]
        metadata_list: Vec<RawMetadataEntry>,
    },
    Failure {
        success: bool,
        error: String,
    },
}

/// Request summary echoed back to the caller.
#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub start: i64,
    pub stop: i64,
    pub count: usize,
    pub duration_hours: f64,
    pub timestamp: String,
}

impl From<SourceResult> for StationResult {
    fn from(result: SourceResult) -> Self {
        match result {
            SourceResult::Success { entries } => StationResult::Success {
                success: true,
                metadata_list: entries.into_iter().map(|e| e.into_json()).collect(),
            },
            SourceResult::Failure { reason } => StationResult::Failure {
                success: false,
                error: reason,
            },
        }
    }
}

impl From<AggregateResponse> for MetadataResponse {
    fn from(aggregate: AggregateResponse) -> Self {
        let metadata = ResponseMeta {
            start: aggregate.range.start(),
            stop: aggregate.range.stop(),
            count: aggregate.entry_count(),
            duration_hours: aggregate.range.duration_hours(),
            timestamp: iso_timestamp(aggregate.generated_at),
        };

        let stations = aggregate
            .sources
            .into_iter()
            .map(|(source, result)| (source.display_name, result.into()))
            .collect();

        MetadataResponse {
            success: true,
            stations: Stations(stations),
            metadata,
        }
    }
}

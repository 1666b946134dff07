//! Metadata records and per-request aggregation results.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use super::parser;
use super::source::SourceSpec;
use super::time_range::TimeRange;

/// Upstream entry as received; field order is preserved.
pub type RawMetadataEntry = Map<String, Value>;

/// Keys that may hold the free-text metadata string, in lookup order.
const METADATA_KEYS: [&str; 2] = ["metadataString", "metadata"];

/// Title and composer extracted from a metadata string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedMetadata {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub composer: Option<String>,
}

impl ParsedMetadata {
    pub fn untitled() -> Self {
        Self {
            title: String::new(),
            composer: None,
        }
    }
}

/// An upstream entry paired with its parsed title fields.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataEntry {
    pub raw: RawMetadataEntry,
    pub parsed: ParsedMetadata,
}

impl MetadataEntry {
    /// Parses the entry's metadata string, if it has one.
    pub fn from_raw(raw: RawMetadataEntry) -> Self {
        let parsed = parser::parse(metadata_string(&raw));
        Self { raw, parsed }
    }

    /// The original fields plus a `parsed` object.
    pub fn into_json(self) -> RawMetadataEntry {
        let mut object = self.raw;
        object.insert("parsed".to_string(), parsed_value(&self.parsed));
        object
    }
}

fn metadata_string(raw: &RawMetadataEntry) -> Option<&str> {
    METADATA_KEYS
        .iter()
        .find_map(|key| raw.get(*key).and_then(Value::as_str))
}

fn parsed_value(parsed: &ParsedMetadata) -> Value {
    let mut object = Map::new();
    object.insert("title".to_string(), Value::String(parsed.title.clone()));
    if let Some(composer) = &parsed.composer {
        object.insert("composer".to_string(), Value::String(composer.clone()));
    }
    Value::Object(object)
}

/// Outcome of one source's fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceResult {
    Success { entries: Vec<MetadataEntry> },
    Failure { reason: String },
}

impl SourceResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Results for every requested source, in request order.
#[derive(Debug, Clone)]
pub struct AggregateResponse {
    pub sources: Vec<(SourceSpec, SourceResult)>,
    pub range: TimeRange,
    pub generated_at: DateTime<Utc>,
}

impl AggregateResponse {
    /// Total entries across all successful sources.
    pub fn entry_count(&self) -> usize {
        self.sources
            .iter()
            .map(|(_, result)| match result {
                SourceResult::Success { entries } => entries.len(),
                SourceResult::Failure { .. } => 0,
            })
            .sum()
    }

    pub fn failed_count(&self) -> usize {
        self.sources
            .iter()
            .filter(|(_, result)| !result.is_success())
            .count()
    }
}

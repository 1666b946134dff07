//! Upstream source definitions and the configured catalog.

use std::collections::HashSet;

use thiserror::Error;

use super::error::MetadataError;

/// Catalog used when `METADATA_SOURCES` is not set.
pub const DEFAULT_SOURCES: &str = "wqxr=WQXR,wnyc=WNYC,tunein-test=TuneIn Test";

/// One upstream station endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSpec {
    pub id: String,
    pub display_name: String,
}

impl SourceSpec {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}

/// Errors found while parsing a catalog definition.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("source catalog is empty")]
    Empty,
    #[error("invalid source entry '{0}', expected 'id=Display Name'")]
    InvalidEntry(String),
    #[error("duplicate source id '{0}'")]
    DuplicateId(String),
    #[error("duplicate source display name '{0}'")]
    DuplicateDisplayName(String),
}

/// Ordered, process-wide list of known sources.
///
/// Ids and display names are unique, so display names can key the
/// per-request result map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceCatalog {
    sources: Vec<SourceSpec>,
}

impl SourceCatalog {
    /// Builds a catalog from specs, rejecting duplicates.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the list is empty or contains a repeated id or
    /// display name.
    pub fn new(sources: Vec<SourceSpec>) -> Result<Self, CatalogError> {
        if sources.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut ids = HashSet::new();
        let mut names = HashSet::new();
        for source in &sources {
            if !ids.insert(source.id.as_str()) {
                return Err(CatalogError::DuplicateId(source.id.clone()));
            }
            if !names.insert(source.display_name.as_str()) {
                return Err(CatalogError::DuplicateDisplayName(
                    source.display_name.clone(),
                ));
            }
        }

        Ok(Self { sources })
    }

    /// Parses a comma-separated list of `id=Display Name` pairs.
    ///
    /// A bare `id` uses the id as its display name.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] on an empty id or name, or any duplicate.
    pub fn parse(definition: &str) -> Result<Self, CatalogError> {
        let mut sources = Vec::new();

        for entry in definition.split(',').map(str::trim) {
            if entry.is_empty() {
                continue;
            }

            let (id, name) = match entry.split_once('=') {
                Some((id, name)) => (id.trim(), name.trim()),
                None => (entry, entry),
            };

            if id.is_empty() || name.is_empty() {
                return Err(CatalogError::InvalidEntry(entry.to_string()));
            }

            sources.push(SourceSpec::new(id, name));
        }

        Self::new(sources)
    }

    pub fn sources(&self) -> &[SourceSpec] {
        &self.sources
    }

    pub fn get(&self, id: &str) -> Option<&SourceSpec> {
        self.sources.iter().find(|source| source.id == id)
    }

    /// Resolves requested ids into specs.
    ///
    /// `None` or an empty list selects every source in catalog order. Requested
    /// ids keep the caller's order; repeats collapse onto the first occurrence.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::Validation`] for an id not in the catalog.
    pub fn select(&self, ids: Option<&[String]>) -> Result<Vec<SourceSpec>, MetadataError> {
        let ids = match ids {
            Some(ids) if !ids.is_empty() => ids,
            _ => return Ok(self.sources.clone()),
        };

        let mut selected: Vec<SourceSpec> = Vec::with_capacity(ids.len());
        for id in ids {
            let source = self
                .get(id)
                .ok_or_else(|| MetadataError::validation(format!("unknown source: {id}")))?;

            if !selected.iter().any(|s| s.id == source.id) {
                selected.push(source.clone());
            }
        }

        Ok(selected)
    }
}

impl Default for SourceCatalog {
    fn default() -> Self {
        Self {
            sources: vec![
                SourceSpec::new("wqxr", "WQXR"),
                SourceSpec::new("wnyc", "WNYC"),
                SourceSpec::new("tunein-test", "TuneIn Test"),
            ],
        }
    }
}

use std::sync::Arc;

use crate::application::services::MetadataService;
use crate::domain::{MetadataFetcher, SourceCatalog};

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub metadata_service: Arc<MetadataService<dyn MetadataFetcher>>,
    pub catalog: Arc<SourceCatalog>,
}

impl AppState {
    pub fn new(metadata_service: MetadataService<dyn MetadataFetcher>, catalog: SourceCatalog) -> Self {
        Self {
            metadata_service: Arc::new(metadata_service),
            catalog: Arc::new(catalog),
        }
    }
}

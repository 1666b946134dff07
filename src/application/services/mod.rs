//! Business logic services for the application layer.

pub mod metadata_service;

pub use metadata_service::MetadataService;

//! Filecab Core Library
//!
//! This crate provides the core domain model, error types, and configuration
//! shared by the storage backends and the CLI.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{BackendKind, CatalogConfig};
pub use error::{CatalogError, CatalogResult};
pub use models::{Record, RecordSet};

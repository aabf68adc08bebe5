//! Filecab Storage Library
//!
//! This crate provides the catalog backend abstraction, its three
//! implementations (memory, JSON flat file, PostgreSQL), and the
//! `CatalogStore` facade that serializes mutations and owns the one-way
//! relational-to-flat-file degradation.
//!
//! # Backend parity
//!
//! Every backend implements the same operation contract with identical
//! semantics, so callers cannot tell which one is running. The list-backed
//! backends share `RecordSet` from `filecab-core` as the single source of
//! those semantics; the relational backend expresses the same rules in SQL
//! and runs under the same conformance tests.

pub mod factory;
pub mod jsonfile;
pub mod memory;
#[cfg(feature = "backend-postgres")]
pub mod postgres;
pub mod store;
pub mod traits;

// Re-export commonly used types
pub use factory::create_backend;
pub use filecab_core::BackendKind;
pub use jsonfile::JsonFileBackend;
pub use memory::MemoryBackend;
#[cfg(feature = "backend-postgres")]
pub use postgres::PostgresBackend;
pub use store::CatalogStore;
pub use traits::CatalogBackend;

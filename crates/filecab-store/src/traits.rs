//! Catalog backend abstraction
//!
//! This module defines the CatalogBackend trait that all storage backends
//! must implement.

use async_trait::async_trait;
use filecab_core::{BackendKind, CatalogResult, Record};

/// Catalog backend abstraction
///
/// All backends (memory, flat file, postgres) implement the same operation
/// set with identical semantics; which one runs is a deployment choice and
/// callers cannot tell them apart. Mutations take `&mut self` and must
/// leave the backend unchanged when they fail. The `CatalogStore` facade
/// serializes mutations, so implementations never see two of them at once.
#[async_trait]
pub trait CatalogBackend: Send + Sync {
    /// Add a record for `name`, assigning the next free id and deriving the
    /// size and kind. Fails on an empty or already-used name.
    async fn create(&mut self, name: &str) -> CatalogResult<Record>;

    /// Change the name of the record with `id` and re-derive its kind.
    /// Size and upload timestamp stay untouched.
    async fn rename(&mut self, id: i64, new_name: &str) -> CatalogResult<Record>;

    /// Remove the record with `id` and return it.
    async fn delete(&mut self, id: i64) -> CatalogResult<Record>;

    /// All live records in ascending id order.
    async fn list(&self) -> CatalogResult<Vec<Record>>;

    /// Records whose name contains `query` case-insensitively. An empty
    /// query matches everything.
    async fn search(&self, query: &str) -> CatalogResult<Vec<Record>>;

    /// Which backend kind this is.
    fn kind(&self) -> BackendKind;
}

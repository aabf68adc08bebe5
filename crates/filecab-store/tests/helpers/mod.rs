//! Test helpers: store constructors and the backend conformance suites.
//!
//! The `run_*` suites each expect a freshly opened, empty store. They are
//! shared between the list-backed conformance tests and the opt-in postgres
//! conformance test so every backend is held to the same contract.

#![allow(dead_code)]

use std::path::Path;

use filecab_core::{BackendKind, CatalogConfig, CatalogError};
use filecab_store::CatalogStore;

pub fn base_config() -> CatalogConfig {
    CatalogConfig {
        backend: BackendKind::Memory,
        data_path: "files.json".to_string(),
        database_url: None,
        db_max_connections: 5,
        db_connect_timeout_secs: 5,
    }
}

pub fn file_config(dir: &Path) -> CatalogConfig {
    CatalogConfig {
        backend: BackendKind::File,
        data_path: dir.join("files.json").to_string_lossy().into_owned(),
        ..base_config()
    }
}

pub async fn memory_store() -> CatalogStore {
    CatalogStore::open(&base_config()).await.unwrap()
}

pub async fn file_store(dir: &Path) -> CatalogStore {
    CatalogStore::open(&file_config(dir)).await.unwrap()
}

/// Create, rename, delete, and search one small catalog end to end.
pub async fn run_full_lifecycle(store: &CatalogStore) {
    let report = store.create("report.pdf").await.unwrap();
    assert_eq!(report.id, 1);
    assert_eq!(report.kind, "pdf");
    assert_eq!(report.size, 10 * 1024);

    let notes = store.create("notes.txt").await.unwrap();
    assert_eq!(notes.id, 2);
    assert_eq!(notes.kind, "txt");

    let listed = store.list().await.unwrap();
    assert_eq!(
        listed.iter().map(|r| r.id).collect::<Vec<_>>(),
        vec![1, 2],
        "list must be in ascending id order"
    );

    let renamed = store.rename(1, "summary.pdf").await.unwrap();
    assert_eq!(renamed.id, 1);
    assert_eq!(renamed.name, "summary.pdf");
    assert_eq!(renamed.kind, "pdf");
    assert_eq!(renamed.size, report.size, "size is fixed at creation");
    assert_eq!(
        renamed.uploaded_at, report.uploaded_at,
        "upload timestamp never changes"
    );

    let removed = store.delete(2).await.unwrap();
    assert_eq!(removed.name, "notes.txt");

    let remaining = store.list().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, 1);

    let hits = store.search("sum").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "summary.pdf");
}

/// Every failing operation returns the right domain error and leaves the
/// store untouched.
pub async fn run_domain_error_rules(store: &CatalogStore) {
    store.create("report.pdf").await.unwrap();

    let err = store.create("").await.unwrap_err();
    assert!(matches!(err, CatalogError::InvalidInput(_)));

    let err = store.create("report.pdf").await.unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateName(name) if name == "report.pdf"));

    // Names are compared case-sensitively.
    store.create("Report.pdf").await.unwrap();

    // The empty-name check wins even when the id does not exist.
    let err = store.rename(99, "").await.unwrap_err();
    assert!(matches!(err, CatalogError::InvalidInput(_)));

    let err = store.rename(99, "other.txt").await.unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(99)));

    let err = store.rename(2, "report.pdf").await.unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateName(_)));

    // Renaming a record to its own name is a no-op, not a collision.
    let renamed = store.rename(1, "report.pdf").await.unwrap();
    assert_eq!(renamed.name, "report.pdf");

    let err = store.delete(42).await.unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(42)));

    let names: Vec<String> = store
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(names, vec!["report.pdf", "Report.pdf"]);
}

/// Search is a case-insensitive substring match; the empty query matches
/// everything.
pub async fn run_search_rules(store: &CatalogStore) {
    store.create("apple.txt").await.unwrap();
    store.create("banana.pdf").await.unwrap();
    store.create("Pineapple.md").await.unwrap();

    let hits = store.search("APPLE").await.unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].name, "apple.txt");
    assert_eq!(hits[1].name, "Pineapple.md");

    let all = store.search("").await.unwrap();
    assert_eq!(all, store.list().await.unwrap());

    assert!(store.search("zip").await.unwrap().is_empty());
}

/// Ids always continue from the current maximum, so only the highest id is
/// reused after a delete.
pub async fn run_id_reuse_rules(store: &CatalogStore) {
    store.create("a.txt").await.unwrap();
    store.create("b.txt").await.unwrap();

    store.delete(2).await.unwrap();
    assert_eq!(store.create("c.txt").await.unwrap().id, 2);

    store.delete(1).await.unwrap();
    assert_eq!(store.create("d.txt").await.unwrap().id, 3);
}

//! The same conformance suites run against the memory and flat-file
//! backends; the postgres backend runs them in `postgres_test.rs` when a
//! test database is available.

mod helpers;

use helpers::{
    file_store, memory_store, run_domain_error_rules, run_full_lifecycle, run_id_reuse_rules,
    run_search_rules,
};

#[tokio::test]
async fn test_memory_backend_full_lifecycle() {
    run_full_lifecycle(&memory_store().await).await;
}

#[tokio::test]
async fn test_memory_backend_domain_error_rules() {
    run_domain_error_rules(&memory_store().await).await;
}

#[tokio::test]
async fn test_memory_backend_search_rules() {
    run_search_rules(&memory_store().await).await;
}

#[tokio::test]
async fn test_memory_backend_id_reuse_rules() {
    run_id_reuse_rules(&memory_store().await).await;
}

#[tokio::test]
async fn test_flat_file_backend_full_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    run_full_lifecycle(&file_store(dir.path()).await).await;
}

#[tokio::test]
async fn test_flat_file_backend_domain_error_rules() {
    let dir = tempfile::tempdir().unwrap();
    run_domain_error_rules(&file_store(dir.path()).await).await;
}

#[tokio::test]
async fn test_flat_file_backend_search_rules() {
    let dir = tempfile::tempdir().unwrap();
    run_search_rules(&file_store(dir.path()).await).await;
}

#[tokio::test]
async fn test_flat_file_backend_id_reuse_rules() {
    let dir = tempfile::tempdir().unwrap();
    run_id_reuse_rules(&file_store(dir.path()).await).await;
}

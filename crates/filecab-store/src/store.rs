//! Catalog store facade
//!
//! `CatalogStore` is the single entry point collaborators talk to. It
//! serializes mutations, lets reads share a consistent snapshot, and owns
//! the one-way relational-to-flat-file degradation: when the postgres
//! backend fails with a connectivity-class error the store swaps in the
//! flat-file backend, logs the transition once, and never probes the
//! database again for the life of the process.

use tokio::sync::RwLock;

use filecab_core::{BackendKind, CatalogConfig, CatalogError, CatalogResult, Record};

use crate::factory::create_backend;
use crate::jsonfile::JsonFileBackend;
use crate::traits::CatalogBackend;

pub struct CatalogStore {
    backend: RwLock<Box<dyn CatalogBackend>>,
    fallback_path: String,
}

impl std::fmt::Debug for CatalogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogStore")
            .field("fallback_path", &self.fallback_path)
            .finish_non_exhaustive()
    }
}

impl CatalogStore {
    /// Open a store for the configured backend. When the postgres backend
    /// is configured but unreachable, the store comes up degraded on the
    /// flat-file document at the configured data path instead of failing.
    pub async fn open(config: &CatalogConfig) -> CatalogResult<Self> {
        let backend = match create_backend(config).await {
            Ok(backend) => backend,
            Err(err) if config.backend == BackendKind::Postgres && err.is_connectivity() => {
                open_fallback(&config.data_path, &err).await?
            }
            Err(err) => return Err(err),
        };

        Ok(CatalogStore {
            backend: RwLock::new(backend),
            fallback_path: config.data_path.clone(),
        })
    }

    /// Which backend is currently serving operations. Reports `File` once
    /// the degraded-mode transition has happened.
    pub async fn backend_kind(&self) -> BackendKind {
        self.backend.read().await.kind()
    }

    pub async fn create(&self, name: &str) -> CatalogResult<Record> {
        let mut backend = self.backend.write().await;
        let record = match backend.create(name).await {
            Err(err) if backend.kind() == BackendKind::Postgres && err.is_connectivity() => {
                *backend = open_fallback(&self.fallback_path, &err).await?;
                backend.create(name).await?
            }
            other => other?,
        };

        tracing::info!(id = record.id, name = %record.name, "File record created");
        Ok(record)
    }

    pub async fn rename(&self, id: i64, new_name: &str) -> CatalogResult<Record> {
        let mut backend = self.backend.write().await;
        let record = match backend.rename(id, new_name).await {
            Err(err) if backend.kind() == BackendKind::Postgres && err.is_connectivity() => {
                *backend = open_fallback(&self.fallback_path, &err).await?;
                backend.rename(id, new_name).await?
            }
            other => other?,
        };

        tracing::info!(id = record.id, name = %record.name, "File record renamed");
        Ok(record)
    }

    pub async fn delete(&self, id: i64) -> CatalogResult<Record> {
        let mut backend = self.backend.write().await;
        let record = match backend.delete(id).await {
            Err(err) if backend.kind() == BackendKind::Postgres && err.is_connectivity() => {
                *backend = open_fallback(&self.fallback_path, &err).await?;
                backend.delete(id).await?
            }
            other => other?,
        };

        tracing::info!(id = record.id, name = %record.name, "File record deleted");
        Ok(record)
    }

    pub async fn list(&self) -> CatalogResult<Vec<Record>> {
        let err = {
            let backend = self.backend.read().await;
            match backend.list().await {
                Err(err) if backend.kind() == BackendKind::Postgres && err.is_connectivity() => {
                    err
                }
                other => return other,
            }
        };
        self.fall_back_for_read(err).await?.list().await
    }

    pub async fn search(&self, query: &str) -> CatalogResult<Vec<Record>> {
        let err = {
            let backend = self.backend.read().await;
            match backend.search(query).await {
                Err(err) if backend.kind() == BackendKind::Postgres && err.is_connectivity() => {
                    err
                }
                other => return other,
            }
        };
        self.fall_back_for_read(err).await?.search(query).await
    }

    /// Complete a degradation detected under the read lock. The backend may
    /// already have been swapped by another task between the locks, so the
    /// kind is re-checked under the write lock before swapping.
    async fn fall_back_for_read(
        &self,
        cause: CatalogError,
    ) -> CatalogResult<tokio::sync::RwLockWriteGuard<'_, Box<dyn CatalogBackend>>> {
        let mut backend = self.backend.write().await;
        if backend.kind() == BackendKind::Postgres {
            *backend = open_fallback(&self.fallback_path, &cause).await?;
        }
        Ok(backend)
    }
}

/// Build the degraded-mode backend. This is the only place the transition
/// is logged, so it happens exactly once per process.
async fn open_fallback(path: &str, cause: &CatalogError) -> CatalogResult<Box<dyn CatalogBackend>> {
    tracing::warn!(
        error = %cause,
        fallback_path = %path,
        "Database unreachable, falling back to the flat-file backend"
    );
    Ok(Box::new(JsonFileBackend::open(path).await?))
}

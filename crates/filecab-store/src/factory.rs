#[cfg(feature = "backend-postgres")]
use crate::PostgresBackend;
use crate::{CatalogBackend, JsonFileBackend, MemoryBackend};
use filecab_core::{BackendKind, CatalogConfig, CatalogResult};

#[cfg(not(feature = "backend-postgres"))]
use filecab_core::CatalogError;

/// Build the configured backend. No fallback happens here; the store facade
/// owns the degradation policy and calls this exactly once.
pub async fn create_backend(config: &CatalogConfig) -> CatalogResult<Box<dyn CatalogBackend>> {
    match config.backend {
        BackendKind::Memory => Ok(Box::new(MemoryBackend::new())),

        BackendKind::File => Ok(Box::new(JsonFileBackend::open(&config.data_path).await?)),

        #[cfg(feature = "backend-postgres")]
        BackendKind::Postgres => Ok(Box::new(PostgresBackend::connect(config).await?)),

        #[cfg(not(feature = "backend-postgres"))]
        BackendKind::Postgres => Err(CatalogError::Configuration(
            "Postgres backend not available (backend-postgres feature not enabled)".to_string(),
        )),
    }
}

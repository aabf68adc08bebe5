use async_trait::async_trait;
use filecab_core::{BackendKind, CatalogResult, Record, RecordSet};

use crate::traits::CatalogBackend;

/// In-memory backend. The working set is the only copy; nothing survives
/// the process. Useful for tests and throwaway deployments.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    records: RecordSet,
}

impl MemoryBackend {
    pub fn new() -> Self {
        MemoryBackend::default()
    }
}

#[async_trait]
impl CatalogBackend for MemoryBackend {
    async fn create(&mut self, name: &str) -> CatalogResult<Record> {
        self.records.create(name)
    }

    async fn rename(&mut self, id: i64, new_name: &str) -> CatalogResult<Record> {
        self.records.rename(id, new_name)
    }

    async fn delete(&mut self, id: i64) -> CatalogResult<Record> {
        self.records.delete(id)
    }

    async fn list(&self) -> CatalogResult<Vec<Record>> {
        Ok(self.records.list())
    }

    async fn search(&self, query: &str) -> CatalogResult<Vec<Record>> {
        Ok(self.records.search(query))
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Memory
    }
}

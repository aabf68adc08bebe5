use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use filecab_core::{BackendKind, CatalogError, CatalogResult, Record, RecordSet};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::traits::CatalogBackend;

/// Flat-file backend: the whole catalog lives in one JSON document.
///
/// Every mutation rewrites the document in full, never incrementally. The
/// write goes to a temporary file in the same directory which is then
/// renamed over the destination, so a crash mid-write cannot leave a
/// half-written catalog behind. The in-memory set is committed only after
/// the document hits disk; a failed persist leaves both file and set as
/// they were.
#[derive(Debug)]
pub struct JsonFileBackend {
    path: PathBuf,
    records: RecordSet,
}

impl JsonFileBackend {
    /// Open the catalog document at `path`. A missing document means an
    /// empty catalog. An unreadable or unparsable one is an error: starting
    /// empty would overwrite it on the first mutation.
    pub async fn open(path: impl Into<PathBuf>) -> CatalogResult<Self> {
        let path = path.into();

        let records = match fs::read(&path).await {
            Ok(bytes) => {
                let records: Vec<Record> = serde_json::from_slice(&bytes)?;
                RecordSet::from_records(records)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => RecordSet::new(),
            Err(err) => return Err(err.into()),
        };

        tracing::info!(
            path = %path.display(),
            records = records.len(),
            "Opened catalog document"
        );

        Ok(JsonFileBackend { path, records })
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Write the full record set as a replacement document: serialize to a
    /// sibling temp file, fsync, then rename over the destination.
    async fn persist(&self, records: &RecordSet) -> CatalogResult<()> {
        let json = serde_json::to_vec_pretty(records.records())?;

        let tmp_name = match self.path.file_name() {
            Some(name) => {
                let mut name = name.to_os_string();
                name.push(".tmp");
                name
            }
            None => {
                return Err(CatalogError::Configuration(format!(
                    "Catalog path {} has no file name",
                    self.path.display()
                )));
            }
        };
        let tmp_path = self.path.with_file_name(tmp_name);

        let mut file = fs::File::create(&tmp_path).await?;
        file.write_all(&json).await?;
        file.sync_all().await?;
        drop(file);

        fs::rename(&tmp_path, &self.path).await?;

        tracing::debug!(
            path = %self.path.display(),
            records = records.len(),
            size_bytes = json.len(),
            "Catalog document persisted"
        );

        Ok(())
    }
}

#[async_trait]
impl CatalogBackend for JsonFileBackend {
    async fn create(&mut self, name: &str) -> CatalogResult<Record> {
        let mut staged = self.records.clone();
        let record = staged.create(name)?;
        self.persist(&staged).await?;
        self.records = staged;
        Ok(record)
    }

    async fn rename(&mut self, id: i64, new_name: &str) -> CatalogResult<Record> {
        let mut staged = self.records.clone();
        let record = staged.rename(id, new_name)?;
        self.persist(&staged).await?;
        self.records = staged;
        Ok(record)
    }

    async fn delete(&mut self, id: i64) -> CatalogResult<Record> {
        let mut staged = self.records.clone();
        let record = staged.delete(id)?;
        self.persist(&staged).await?;
        self.records = staged;
        Ok(record)
    }

    async fn list(&self) -> CatalogResult<Vec<Record>> {
        Ok(self.records.list())
    }

    async fn search(&self, query: &str) -> CatalogResult<Vec<Record>> {
        Ok(self.records.search(query))
    }

    fn kind(&self) -> BackendKind {
        BackendKind::File
    }
}

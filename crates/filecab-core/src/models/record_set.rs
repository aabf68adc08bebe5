use crate::error::{CatalogError, CatalogResult};
use crate::models::Record;

/// Ordered working set of live records.
///
/// This is the canonical implementation of the catalog operation semantics:
/// name uniqueness, id assignment, metadata derivation, and search. The
/// memory and flat-file backends both delegate to it so their behavior can
/// never drift apart; the relational backend expresses the same rules in SQL.
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    records: Vec<Record>,
}

impl RecordSet {
    pub fn new() -> Self {
        RecordSet::default()
    }

    /// Rebuild from previously persisted records, normalizing to ascending
    /// id order.
    pub fn from_records(mut records: Vec<Record>) -> Self {
        records.sort_by_key(|record| record.id);
        RecordSet { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Next id to assign: one past the highest live id, 1 for an empty set.
    /// Computed from the current contents, so the highest id is reused after
    /// its record is deleted.
    fn next_id(&self) -> i64 {
        self.records.iter().map(|record| record.id).max().unwrap_or(0) + 1
    }

    pub fn create(&mut self, name: &str) -> CatalogResult<Record> {
        if name.is_empty() {
            return Err(CatalogError::InvalidInput(
                "file name must not be empty".to_string(),
            ));
        }
        if self.records.iter().any(|record| record.name == name) {
            return Err(CatalogError::DuplicateName(name.to_string()));
        }
        let record = Record::new(self.next_id(), name);
        self.records.push(record.clone());
        Ok(record)
    }

    pub fn rename(&mut self, id: i64, new_name: &str) -> CatalogResult<Record> {
        if new_name.is_empty() {
            return Err(CatalogError::InvalidInput(
                "file name must not be empty".to_string(),
            ));
        }
        let index = self
            .records
            .iter()
            .position(|record| record.id == id)
            .ok_or(CatalogError::NotFound(id))?;
        if self
            .records
            .iter()
            .any(|record| record.id != id && record.name == new_name)
        {
            return Err(CatalogError::DuplicateName(new_name.to_string()));
        }
        self.records[index].rename(new_name);
        Ok(self.records[index].clone())
    }

    pub fn delete(&mut self, id: i64) -> CatalogResult<Record> {
        let index = self
            .records
            .iter()
            .position(|record| record.id == id)
            .ok_or(CatalogError::NotFound(id))?;
        Ok(self.records.remove(index))
    }

    /// All live records in ascending id order. Ids are assigned
    /// monotonically and loads are sorted, so the backing vec already holds
    /// that order.
    pub fn list(&self) -> Vec<Record> {
        self.records.clone()
    }

    /// Records whose name contains `query` case-insensitively, in the same
    /// order as [`list`](Self::list). An empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<Record> {
        let needle = query.to_lowercase();
        self.records
            .iter()
            .filter(|record| record.name.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }
}

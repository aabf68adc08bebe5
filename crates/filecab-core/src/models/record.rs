use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{SIZE_PER_NAME_CHAR, UNKNOWN_KIND};

/// One catalog entry: a named file-like item with derived metadata.
///
/// `size` and `kind` are never supplied by callers. Both are derived from the
/// name: the size is a simulated value (character count times
/// [`SIZE_PER_NAME_CHAR`]) fixed at creation, and the kind is the extension
/// after the last `'.'`, re-derived whenever the name changes. The kind is
/// serialized and persisted under the field name `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Record {
    pub id: i64,
    pub name: String,
    pub size: i64,
    pub uploaded_at: DateTime<Utc>,
    #[serde(rename = "type")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "type"))]
    pub kind: String,
}

impl Record {
    /// Build a new record with derived size and kind, stamped with the
    /// current time.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        let name = name.into();
        Record {
            id,
            size: Record::derive_size(&name),
            kind: Record::derive_kind(&name),
            uploaded_at: Utc::now(),
            name,
        }
    }

    /// Simulated size in bytes for a given name.
    pub fn derive_size(name: &str) -> i64 {
        name.chars().count() as i64 * SIZE_PER_NAME_CHAR
    }

    /// Extension after the last `'.'` in the name, or `"unknown"` when the
    /// name contains no dot. A trailing dot yields the empty string.
    pub fn derive_kind(name: &str) -> String {
        match name.rsplit_once('.') {
            Some((_, extension)) => extension.to_string(),
            None => UNKNOWN_KIND.to_string(),
        }
    }

    /// Replace the name and re-derive the kind. The size and upload
    /// timestamp are fixed at creation and stay untouched.
    pub fn rename(&mut self, new_name: impl Into<String>) {
        self.name = new_name.into();
        self.kind = Record::derive_kind(&self.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_kind_with_extension() {
        assert_eq!(Record::derive_kind("report.pdf"), "pdf");
        assert_eq!(Record::derive_kind("archive.tar.gz"), "gz");
        assert_eq!(Record::derive_kind(".gitignore"), "gitignore");
    }

    #[test]
    fn test_derive_kind_without_extension() {
        assert_eq!(Record::derive_kind("README"), "unknown");
        assert_eq!(Record::derive_kind(""), "unknown");
    }

    #[test]
    fn test_derive_kind_trailing_dot() {
        assert_eq!(Record::derive_kind("archive."), "");
    }

    #[test]
    fn test_derive_size_counts_characters() {
        assert_eq!(Record::derive_size("notes.txt"), 9 * 1024);
        assert_eq!(Record::derive_size(""), 0);
        // Characters, not bytes: a two-byte UTF-8 scalar counts once.
        assert_eq!(Record::derive_size("résumé.doc"), 10 * 1024);
    }

    #[test]
    fn test_new_derives_metadata() {
        let record = Record::new(1, "report.pdf");
        assert_eq!(record.id, 1);
        assert_eq!(record.name, "report.pdf");
        assert_eq!(record.size, 10 * 1024);
        assert_eq!(record.kind, "pdf");
    }

    #[test]
    fn test_rename_keeps_size_and_timestamp() {
        let mut record = Record::new(1, "report.pdf");
        let size = record.size;
        let uploaded_at = record.uploaded_at;
        record.rename("summary.md");
        assert_eq!(record.name, "summary.md");
        assert_eq!(record.kind, "md");
        assert_eq!(record.size, size);
        assert_eq!(record.uploaded_at, uploaded_at);
    }

    #[test]
    fn test_kind_serializes_as_type() {
        let record = Record::new(1, "notes.txt");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "txt");
        assert!(json.get("kind").is_none());
    }
}

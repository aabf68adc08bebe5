//! Error types module
//!
//! All catalog failures are unified under the `CatalogError` enum. The
//! domain errors (`DuplicateName`, `NotFound`, `InvalidInput`) are
//! recoverable at the boundary and map to user-visible messages; the
//! infrastructure errors wrap the underlying source.
//!
//! The `Database` variant and `From<sqlx::Error>` are gated behind the
//! `sqlx` feature. With `default-features = false` there is no database
//! variant and the relational backend cannot be compiled in.

use std::io;

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Duplicate file name: {0}")]
    DuplicateName(String),

    #[error("No file with id {0}")]
    NotFound(i64),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[source] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[source] serde_json::Error),

    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),
}

impl CatalogError {
    /// True when the error means the database cannot be reached at all, as
    /// opposed to a query-level failure. Only connectivity errors are
    /// allowed to trigger the relational-to-flat-file fallback; everything
    /// else surfaces to the caller unchanged.
    pub fn is_connectivity(&self) -> bool {
        #[cfg(feature = "sqlx")]
        if let CatalogError::Database(err) = self {
            return matches!(
                err,
                SqlxError::Io(_)
                    | SqlxError::Tls(_)
                    | SqlxError::Protocol(_)
                    | SqlxError::PoolTimedOut
                    | SqlxError::PoolClosed
                    | SqlxError::WorkerCrashed
            );
        }
        false
    }
}

impl From<io::Error> for CatalogError {
    fn from(err: io::Error) -> Self {
        CatalogError::Io(err)
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Serialization(err)
    }
}

#[cfg(feature = "sqlx")]
impl From<SqlxError> for CatalogError {
    fn from(err: SqlxError) -> Self {
        CatalogError::Database(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_messages() {
        let err = CatalogError::DuplicateName("report.pdf".to_string());
        assert_eq!(err.to_string(), "Duplicate file name: report.pdf");

        let err = CatalogError::NotFound(7);
        assert_eq!(err.to_string(), "No file with id 7");

        let err = CatalogError::InvalidInput("file name must not be empty".to_string());
        assert_eq!(err.to_string(), "Invalid input: file name must not be empty");
    }

    #[test]
    fn test_domain_errors_are_not_connectivity() {
        assert!(!CatalogError::NotFound(1).is_connectivity());
        assert!(!CatalogError::DuplicateName("a.txt".to_string()).is_connectivity());
        let io_err = io::Error::new(io::ErrorKind::ConnectionRefused, "refused");
        assert!(!CatalogError::Io(io_err).is_connectivity());
    }

    #[cfg(feature = "sqlx")]
    #[test]
    fn test_connectivity_classification() {
        let io_err = io::Error::new(io::ErrorKind::ConnectionRefused, "refused");
        assert!(CatalogError::from(SqlxError::Io(io_err)).is_connectivity());
        assert!(CatalogError::from(SqlxError::PoolTimedOut).is_connectivity());
        assert!(CatalogError::from(SqlxError::PoolClosed).is_connectivity());

        assert!(!CatalogError::from(SqlxError::RowNotFound).is_connectivity());
        assert!(!CatalogError::from(SqlxError::ColumnNotFound("type".to_string()))
            .is_connectivity());
    }
}

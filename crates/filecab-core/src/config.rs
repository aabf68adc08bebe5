//! Configuration module
//!
//! Deployment-time configuration for the catalog: which backend to run and
//! how to reach it. Values come from the environment (a `.env` file is
//! honored), with defaults suitable for a local flat-file deployment.

use std::env;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::constants::DEFAULT_DATA_PATH;

// Defaults
const DB_MAX_CONNECTIONS: u32 = 5;
const DB_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Storage backend kinds
///
/// Selecting a backend is a deployment choice; the operation contract is
/// identical across all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Memory,
    File,
    Postgres,
}

impl FromStr for BackendKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(BackendKind::Memory),
            "file" => Ok(BackendKind::File),
            "postgres" => Ok(BackendKind::Postgres),
            _ => Err(anyhow::anyhow!("Invalid catalog backend: {}", s)),
        }
    }
}

impl Display for BackendKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            BackendKind::Memory => write!(f, "memory"),
            BackendKind::File => write!(f, "file"),
            BackendKind::Postgres => write!(f, "postgres"),
        }
    }
}

/// Catalog configuration
#[derive(Clone, Debug)]
pub struct CatalogConfig {
    pub backend: BackendKind,
    /// Flat-file document path. Also the fallback target when the postgres
    /// backend is unreachable.
    pub data_path: String,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub db_connect_timeout_secs: u64,
}

impl CatalogConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        Ok(CatalogConfig {
            backend: env::var("FILECAB_BACKEND")
                .unwrap_or_else(|_| "file".to_string())
                .parse()?,
            data_path: env::var("FILECAB_DATA_PATH")
                .unwrap_or_else(|_| DEFAULT_DATA_PATH.to_string()),
            database_url: env::var("FILECAB_DATABASE_URL")
                .or_else(|_| env::var("DATABASE_URL"))
                .ok(),
            db_max_connections: env::var("FILECAB_DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| DB_MAX_CONNECTIONS.to_string())
                .parse()
                .map_err(|_| {
                    anyhow::anyhow!("FILECAB_DB_MAX_CONNECTIONS must be a valid number")
                })?,
            db_connect_timeout_secs: env::var("FILECAB_DB_CONNECT_TIMEOUT_SECS")
                .unwrap_or_else(|_| DB_CONNECT_TIMEOUT_SECS.to_string())
                .parse()
                .map_err(|_| {
                    anyhow::anyhow!("FILECAB_DB_CONNECT_TIMEOUT_SECS must be a valid number")
                })?,
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.data_path.is_empty() {
            return Err(anyhow::anyhow!("FILECAB_DATA_PATH must not be empty"));
        }

        if self.db_max_connections == 0 {
            return Err(anyhow::anyhow!(
                "FILECAB_DB_MAX_CONNECTIONS must be at least 1"
            ));
        }

        if self.backend == BackendKind::Postgres {
            match &self.database_url {
                None => {
                    return Err(anyhow::anyhow!(
                        "FILECAB_DATABASE_URL or DATABASE_URL must be set when using the postgres backend"
                    ));
                }
                Some(url)
                    if !url.starts_with("postgres://") && !url.starts_with("postgresql://") =>
                {
                    return Err(anyhow::anyhow!(
                        "FILECAB_DATABASE_URL must be a valid PostgreSQL connection string"
                    ));
                }
                Some(_) => {}
            }
        }

        Ok(())
    }
}

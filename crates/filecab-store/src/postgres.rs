use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use filecab_core::{BackendKind, CatalogConfig, CatalogError, CatalogResult, Record};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres};

use crate::traits::CatalogBackend;

/// The single table behind the relational backend. Bootstrapped at connect
/// time; there is deliberately no migration machinery for one table.
const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS files (
    id BIGINT PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    size BIGINT NOT NULL,
    uploaded_at TIMESTAMPTZ NOT NULL,
    "type" TEXT NOT NULL
)
"#;

/// PostgreSQL backend. Expresses the same operation semantics as the
/// list-backed backends in SQL: EXISTS prechecks for the domain errors,
/// `COALESCE(MAX(id), 0) + 1` for id assignment, and the UNIQUE constraint
/// on `name` as a backstop should a concurrent writer slip past a precheck.
pub struct PostgresBackend {
    pool: PgPool,
}

impl PostgresBackend {
    /// Connect with the configured pool limits, probe liveness, and ensure
    /// the schema exists.
    pub async fn connect(config: &CatalogConfig) -> CatalogResult<Self> {
        let url = config.database_url.as_deref().ok_or_else(|| {
            CatalogError::Configuration("FILECAB_DATABASE_URL not configured".to_string())
        })?;

        tracing::info!("Connecting to database...");
        let pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(config.db_connect_timeout_secs))
            .connect(url)
            .await?;

        sqlx::query_scalar::<Postgres, i32>("SELECT 1")
            .fetch_one(&pool)
            .await?;
        sqlx::query(SCHEMA).execute(&pool).await?;

        tracing::info!(
            max_connections = config.db_max_connections,
            "Database connected successfully"
        );

        Ok(PostgresBackend { pool })
    }

    #[tracing::instrument(skip(self), fields(db.table = "files", db.operation = "insert"))]
    async fn create_file(&self, name: &str) -> CatalogResult<Record> {
        if name.is_empty() {
            return Err(CatalogError::InvalidInput(
                "file name must not be empty".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        let duplicate_exists = sqlx::query_scalar::<Postgres, bool>(
            "SELECT EXISTS(SELECT 1 FROM files WHERE name = $1)",
        )
        .bind(name)
        .fetch_one(&mut *tx)
        .await?;
        if duplicate_exists {
            return Err(CatalogError::DuplicateName(name.to_string()));
        }

        let record = sqlx::query_as::<Postgres, Record>(
            r#"
            INSERT INTO files (id, name, size, uploaded_at, "type")
            VALUES ((SELECT COALESCE(MAX(id), 0) + 1 FROM files), $1, $2, $3, $4)
            RETURNING id, name, size, uploaded_at, "type"
            "#,
        )
        .bind(name)
        .bind(Record::derive_size(name))
        .bind(Utc::now())
        .bind(Record::derive_kind(name))
        .fetch_one(&mut *tx)
        .await
        .map_err(|err| duplicate_name_on_unique_violation(name, err))?;

        tx.commit().await?;
        Ok(record)
    }

    #[tracing::instrument(skip(self), fields(db.table = "files", db.operation = "update", db.record_id = %id))]
    async fn rename_file(&self, id: i64, new_name: &str) -> CatalogResult<Record> {
        if new_name.is_empty() {
            return Err(CatalogError::InvalidInput(
                "file name must not be empty".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        let exists =
            sqlx::query_scalar::<Postgres, bool>("SELECT EXISTS(SELECT 1 FROM files WHERE id = $1)")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;
        if !exists {
            return Err(CatalogError::NotFound(id));
        }

        let name_taken = sqlx::query_scalar::<Postgres, bool>(
            "SELECT EXISTS(SELECT 1 FROM files WHERE name = $1 AND id <> $2)",
        )
        .bind(new_name)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;
        if name_taken {
            return Err(CatalogError::DuplicateName(new_name.to_string()));
        }

        let record = sqlx::query_as::<Postgres, Record>(
            r#"
            UPDATE files SET name = $1, "type" = $2
            WHERE id = $3
            RETURNING id, name, size, uploaded_at, "type"
            "#,
        )
        .bind(new_name)
        .bind(Record::derive_kind(new_name))
        .bind(id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|err| duplicate_name_on_unique_violation(new_name, err))?;

        tx.commit().await?;
        Ok(record)
    }

    #[tracing::instrument(skip(self), fields(db.table = "files", db.operation = "delete", db.record_id = %id))]
    async fn delete_file(&self, id: i64) -> CatalogResult<Record> {
        sqlx::query_as::<Postgres, Record>(
            r#"DELETE FROM files WHERE id = $1 RETURNING id, name, size, uploaded_at, "type""#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(CatalogError::NotFound(id))
    }

    #[tracing::instrument(skip(self), fields(db.table = "files", db.operation = "select"))]
    async fn list_files(&self) -> CatalogResult<Vec<Record>> {
        let records = sqlx::query_as::<Postgres, Record>(
            r#"SELECT id, name, size, uploaded_at, "type" FROM files ORDER BY id ASC"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }

    #[tracing::instrument(skip(self), fields(db.table = "files", db.operation = "select"))]
    async fn search_files(&self, query: &str) -> CatalogResult<Vec<Record>> {
        // strpos matches the query literally, so wildcard characters in it
        // need no escaping; strpos(name, '') is 1, so an empty query
        // matches everything.
        let records = sqlx::query_as::<Postgres, Record>(
            r#"
            SELECT id, name, size, uploaded_at, "type" FROM files
            WHERE strpos(lower(name), lower($1)) > 0
            ORDER BY id ASC
            "#,
        )
        .bind(query)
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }
}

#[async_trait]
impl CatalogBackend for PostgresBackend {
    async fn create(&mut self, name: &str) -> CatalogResult<Record> {
        self.create_file(name).await
    }

    async fn rename(&mut self, id: i64, new_name: &str) -> CatalogResult<Record> {
        self.rename_file(id, new_name).await
    }

    async fn delete(&mut self, id: i64) -> CatalogResult<Record> {
        self.delete_file(id).await
    }

    async fn list(&self) -> CatalogResult<Vec<Record>> {
        self.list_files().await
    }

    async fn search(&self, query: &str) -> CatalogResult<Vec<Record>> {
        self.search_files(query).await
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Postgres
    }
}

fn duplicate_name_on_unique_violation(name: &str, err: sqlx::Error) -> CatalogError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return CatalogError::DuplicateName(name.to_string());
        }
    }
    err.into()
}

use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors from the storage layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Invalid table name: {0}")]
    InvalidTableName(String),

    #[error("Duplicate key: {0}")]
    Duplicate(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl DatabaseError {
    /// Map a driver error, turning unique-index violations into `Duplicate`
    pub fn from_sqlx(err: sqlx::Error, key: &str) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                DatabaseError::Duplicate(key.to_string())
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                DatabaseError::ConnectionError(err.to_string())
            }
            _ => DatabaseError::Sqlx(err),
        }
    }
}

/// Postgres SQLSTATE for unique_violation
const UNIQUE_VIOLATION: &str = "23505";

/// Builds and checks the PostgreSQL connection pool used by the document stores
pub struct DatabaseManager;

impl DatabaseManager {
    /// Connect a pool using the configured URL and limits
    pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let url = config
            .url
            .as_deref()
            .ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;
        let redacted = Self::redacted_url(url)?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await
            .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

        info!("Created database pool for: {}", redacted);
        Ok(pool)
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }

    /// Create the document table for one resource if it does not exist yet
    pub async fn ensure_table(pool: &PgPool, table_name: &str) -> Result<(), DatabaseError> {
        let table = Self::quote_identifier(table_name)?;
        let query = format!(
            "CREATE TABLE IF NOT EXISTS {} (\
                name TEXT PRIMARY KEY, \
                doc JSONB NOT NULL, \
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()\
            )",
            table
        );
        sqlx::query(&query).execute(pool).await?;
        info!("Ensured table {}", table_name);
        Ok(())
    }

    /// Close the pool (e.g., on shutdown)
    pub async fn close(pool: &PgPool) {
        pool.close().await;
        info!("Closed database pool");
    }

    /// Quote a validated SQL identifier
    pub fn quote_identifier(name: &str) -> Result<String, DatabaseError> {
        if !Self::is_valid_table_name(name) {
            return Err(DatabaseError::InvalidTableName(name.to_string()));
        }
        Ok(format!("\"{}\"", name.replace('"', "\"\"")))
    }

    /// Table names are lowercase ASCII letters, digits and underscores,
    /// starting with a letter
    fn is_valid_table_name(name: &str) -> bool {
        let mut chars = name.chars();
        match chars.next() {
            Some(c) if c.is_ascii_lowercase() => {}
            _ => return false,
        }
        name.len() <= 63 && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    }

    /// URL with the password stripped, safe for logs
    pub fn redacted_url(raw: &str) -> Result<String, DatabaseError> {
        let mut url = url::Url::parse(raw).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        if url.password().is_some() {
            url.set_password(Some("***"))
                .map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        }
        Ok(url.into())
    }
}

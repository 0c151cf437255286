use std::future::Future;
use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;

use crate::config::DatabaseConfig;
use crate::filter::FilterError;

/// Errors from the relational store
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error("Query timed out after {0}ms")]
    Timeout(u64),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl DatabaseError {
    /// True for a Postgres unique-constraint violation (SQLSTATE 23505).
    pub fn is_unique_violation(&self) -> bool {
        match self {
            DatabaseError::Sqlx(sqlx::Error::Database(db)) => db.code().as_deref() == Some("23505"),
            _ => false,
        }
    }
}

/// Per-call execution limits shared by every query the service issues.
#[derive(Debug, Clone, Copy)]
pub struct QuerySettings {
    pub timeout: Duration,
    pub slow_query_threshold: Option<Duration>,
}

impl QuerySettings {
    pub fn from_config(config: &DatabaseConfig) -> Self {
        Self {
            timeout: Duration::from_millis(config.query_timeout_ms),
            slow_query_threshold: config
                .enable_slow_query_warning
                .then(|| Duration::from_millis(config.slow_query_threshold_ms)),
        }
    }
}

pub struct DatabaseManager;

impl DatabaseManager {
    fn options(config: &DatabaseConfig) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
    }

    /// Pool that connects on first use; lets the server start before the database is up.
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        if config.url.is_empty() {
            return Err(DatabaseError::ConfigMissing("DATABASE_URL"));
        }
        Ok(Self::options(config).connect_lazy(&config.url)?)
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(pool: &PgPool, timeout: Duration) -> Result<(), DatabaseError> {
        with_timeout(timeout, sqlx::query("SELECT 1").execute(pool)).await?;
        Ok(())
    }
}

/// Bound a store call by `timeout`. Dropping the query future on expiry
/// cancels it.
pub async fn with_timeout<T, F>(timeout: Duration, fut: F) -> Result<T, DatabaseError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    tokio::time::timeout(timeout, fut)
        .await
        .map_err(|_| DatabaseError::Timeout(timeout.as_millis() as u64))?
        .map_err(DatabaseError::from)
}

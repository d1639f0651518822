//! Backend selection from a connection string.

use crate::duckdb::DuckDbBackend;
use crate::error::{DbError, DbResult};
use crate::traits::Database;
use std::sync::Arc;

/// Which backend a connection string selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// `postgres://` or `postgresql://` URL
    Postgres,
    /// `duckdb://<path>`, `:memory:`, or a bare file path
    DuckDb,
}

/// Classify a connection string, returning the backend and the part of the
/// string that backend should receive.
pub fn classify(url: &str) -> (BackendKind, &str) {
    if url.starts_with("postgres://") || url.starts_with("postgresql://") {
        (BackendKind::Postgres, url)
    } else if let Some(path) = url.strip_prefix("duckdb://") {
        (BackendKind::DuckDb, path)
    } else {
        (BackendKind::DuckDb, url)
    }
}

/// Open a connection for `url`.
pub async fn connect(url: &str) -> DbResult<Arc<dyn Database>> {
    if url.trim().is_empty() {
        return Err(DbError::ConnectionError(
            "connection string is empty".to_string(),
        ));
    }

    match classify(url) {
        (BackendKind::Postgres, url) => connect_postgres(url).await,
        (BackendKind::DuckDb, path) => {
            log::debug!("Opening DuckDB database at {path}");
            Ok(Arc::new(DuckDbBackend::new(path)?))
        }
    }
}

#[cfg(feature = "postgres")]
async fn connect_postgres(url: &str) -> DbResult<Arc<dyn Database>> {
    log::debug!("Connecting to PostgreSQL");
    Ok(Arc::new(crate::postgres::PostgresBackend::connect(url).await?))
}

#[cfg(not(feature = "postgres"))]
async fn connect_postgres(_url: &str) -> DbResult<Arc<dyn Database>> {
    Err(DbError::NotImplemented {
        backend: "postgres".to_string(),
        feature: "built without the `postgres` feature".to_string(),
    })
}

#[cfg(test)]
#[path = "connect_test.rs"]
mod tests;

//! Persisted "last applied migration" marker.
//!
//! The tracking table holds a single row whose `name` column is the frontier:
//! the last migration applied by a successful run. Every method runs inside
//! the caller's transaction.

use crate::error::{EngineError, EngineResult};
use mg_db::Database;

/// Reads and writes the frontier marker in the tracking table.
#[derive(Debug, Clone)]
pub struct Tracker {
    table: String,
}

impl Tracker {
    /// Create a tracker for `table` (plain or `schema.table`).
    ///
    /// The name is interpolated into SQL; callers validate it first.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
        }
    }

    /// The tracking table name
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Whether the tracking table exists, by catalog probe.
    pub async fn exists(&self, db: &dyn Database) -> EngineResult<bool> {
        db.table_exists(&self.table)
            .await
            .map_err(EngineError::Tracking)
    }

    /// Create the tracking table when the catalog probe does not find it.
    ///
    /// Returns `true` when the table was created.
    pub async fn ensure_table(&self, db: &dyn Database) -> EngineResult<bool> {
        if self.exists(db).await? {
            return Ok(false);
        }

        log::debug!("Creating tracking table {}", self.table);
        db.execute_batch(&format!(
            "CREATE TABLE {} (name VARCHAR(255) PRIMARY KEY)",
            self.table
        ))
        .await
        .map_err(EngineError::Tracking)?;
        Ok(true)
    }

    /// The recorded marker, or `None` before the first successful run.
    ///
    /// More than one row is an error.
    pub async fn read_marker(&self, db: &dyn Database) -> EngineResult<Option<String>> {
        let mut markers = db
            .query_text_column(&format!("SELECT name FROM {} LIMIT 2", self.table))
            .await
            .map_err(EngineError::Tracking)?;

        if markers.len() > 1 {
            markers.sort();
            return Err(EngineError::AmbiguousMarker {
                table: self.table.clone(),
                markers,
            });
        }
        Ok(markers.pop())
    }

    /// Set the marker to `name`, updating the row or inserting it if absent.
    pub async fn write_marker(&self, db: &dyn Database, name: &str) -> EngineResult<()> {
        let updated = db
            .execute_with_param(&format!("UPDATE {} SET name = $1", self.table), name)
            .await
            .map_err(EngineError::Tracking)?;

        if updated == 0 {
            db.execute_with_param(
                &format!("INSERT INTO {} (name) VALUES ($1)", self.table),
                name,
            )
            .await
            .map_err(EngineError::Tracking)?;
        }
        Ok(())
    }

    /// Advisory lock key for this tracking table.
    ///
    /// FNV-1a over the table name, so every process migrating the same table
    /// contends on the same key.
    pub fn lock_key(&self) -> i64 {
        const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
        const PRIME: u64 = 0x0000_0100_0000_01b3;

        let hash = self
            .table
            .bytes()
            .fold(OFFSET, |acc, b| (acc ^ u64::from(b)).wrapping_mul(PRIME));
        hash as i64
    }
}

#[cfg(test)]
#[path = "tracker_test.rs"]
mod tests;

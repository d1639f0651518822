//! Database trait definition

use crate::error::DbResult;
use async_trait::async_trait;

/// Database abstraction trait for mg
///
/// A backend wraps exactly one connection, so `begin`/`commit`/`rollback`
/// bracket every statement issued through the same value in between.
/// Implementations must be Send + Sync for async operation.
#[async_trait]
pub trait Database: Send + Sync {
    /// Execute one or more SQL statements
    async fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Execute a single statement with one text parameter bound to `$1`,
    /// returning the number of affected rows
    async fn execute_with_param(&self, sql: &str, value: &str) -> DbResult<usize>;

    /// Return the first column of every row as text, in result order
    async fn query_text_column(&self, sql: &str) -> DbResult<Vec<String>>;

    /// Check the system catalog for a table (optionally `schema.table`)
    async fn table_exists(&self, name: &str) -> DbResult<bool>;

    /// Open a transaction
    async fn begin(&self) -> DbResult<()>;

    /// Commit the open transaction
    async fn commit(&self) -> DbResult<()>;

    /// Roll back the open transaction
    async fn rollback(&self) -> DbResult<()>;

    /// Take an exclusive migration lock scoped to the open transaction.
    ///
    /// The lock is released by `commit` or `rollback`.
    async fn lock_migrations(&self, key: i64) -> DbResult<()>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}

/// Split `schema.table` into its parts, `None` for an unqualified name.
pub(crate) fn split_qualified(name: &str) -> (Option<&str>, &str) {
    match name.rfind('.') {
        Some(pos) => (Some(&name[..pos]), &name[pos + 1..]),
        None => (None, name),
    }
}

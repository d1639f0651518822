//! PostgreSQL database backend implementation
//!
//! Holds a single `PgConnection` so that transaction-control statements and
//! migration bodies all run on the same session.

use crate::error::{DbError, DbResult};
use crate::traits::{split_qualified, Database};
use async_trait::async_trait;
use sqlx::{Connection, Executor, PgConnection};
use tokio::sync::Mutex;

/// PostgreSQL database backend
pub struct PostgresBackend {
    conn: Mutex<PgConnection>,
}

impl PostgresBackend {
    /// Connect to `url` and verify the server is reachable.
    pub async fn connect(url: &str) -> DbResult<Self> {
        let mut conn = PgConnection::connect(url)
            .await
            .map_err(|e| DbError::ConnectionError(e.to_string()))?;
        conn.ping()
            .await
            .map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run a transaction-control statement
    async fn transaction_stmt(&self, stmt: &str) -> DbResult<()> {
        let mut conn = self.conn.lock().await;
        conn.execute(sqlx::raw_sql(stmt))
            .await
            .map_err(|e| DbError::TransactionError(format!("{stmt} failed: {e}")))?;
        Ok(())
    }
}

/// The names PostgreSQL stores for an unquoted `name` or `schema.name`.
///
/// Unquoted identifiers fold to lower case, so `Migration` lives in
/// `pg_tables` as `migration`.
pub(crate) fn catalog_names(name: &str) -> (Option<String>, String) {
    let (schema, table) = split_qualified(name);
    (
        schema.map(str::to_ascii_lowercase),
        table.to_ascii_lowercase(),
    )
}

#[async_trait]
impl Database for PostgresBackend {
    async fn execute_batch(&self, sql: &str) -> DbResult<()> {
        let mut conn = self.conn.lock().await;
        conn.execute(sqlx::raw_sql(sql)).await?;
        Ok(())
    }

    async fn execute_with_param(&self, sql: &str, value: &str) -> DbResult<usize> {
        let mut conn = self.conn.lock().await;
        let result = sqlx::query(sql)
            .bind(value)
            .execute(&mut *conn)
            .await
            .map_err(|e| DbError::ExecutionError(format!("{e}: {sql}")))?;
        Ok(result.rows_affected() as usize)
    }

    async fn query_text_column(&self, sql: &str) -> DbResult<Vec<String>> {
        let mut conn = self.conn.lock().await;
        let values = sqlx::query_scalar::<_, String>(sql)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| DbError::ExecutionError(format!("{e}: {sql}")))?;
        Ok(values)
    }

    async fn table_exists(&self, name: &str) -> DbResult<bool> {
        let (schema, table) = catalog_names(name);

        let mut conn = self.conn.lock().await;
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                SELECT 1 FROM pg_catalog.pg_tables
                WHERE schemaname = COALESCE($1, current_schema())
                AND tablename = $2
            )",
        )
        .bind(schema)
        .bind(table)
        .fetch_one(&mut *conn)
        .await?;
        Ok(exists)
    }

    async fn begin(&self) -> DbResult<()> {
        self.transaction_stmt("BEGIN").await
    }

    async fn commit(&self) -> DbResult<()> {
        self.transaction_stmt("COMMIT").await
    }

    async fn rollback(&self) -> DbResult<()> {
        self.transaction_stmt("ROLLBACK").await
    }

    async fn lock_migrations(&self, key: i64) -> DbResult<()> {
        let mut conn = self.conn.lock().await;
        log::debug!("Waiting for advisory lock {key}");
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(key)
            .execute(&mut *conn)
            .await
            .map_err(|e| DbError::TransactionError(format!("advisory lock failed: {e}")))?;
        Ok(())
    }

    fn db_type(&self) -> &'static str {
        "postgres"
    }
}

#[cfg(test)]
#[path = "postgres_test.rs"]
mod tests;

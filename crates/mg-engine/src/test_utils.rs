//! Shared helpers for engine and tracker tests.

use crate::cancel::CancelFlag;
use async_trait::async_trait;
use mg_db::{Database, DbError, DbResult, DuckDbBackend};
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory DuckDB wrapper that records what the engine sends it.
pub(crate) struct RecordingDb {
    pub(crate) inner: DuckDbBackend,
    batches: Mutex<Vec<String>>,
    writes: AtomicUsize,
    begins: AtomicUsize,
    fail_commit: AtomicBool,
    fail_begin: AtomicBool,
    cancel_after: Mutex<Option<(usize, CancelFlag)>>,
}

impl RecordingDb {
    pub(crate) fn new() -> Self {
        Self {
            inner: DuckDbBackend::in_memory().unwrap(),
            batches: Mutex::new(Vec::new()),
            writes: AtomicUsize::new(0),
            begins: AtomicUsize::new(0),
            fail_commit: AtomicBool::new(false),
            fail_begin: AtomicBool::new(false),
            cancel_after: Mutex::new(None),
        }
    }

    /// Every `execute_batch` body seen so far, in order.
    pub(crate) fn batches(&self) -> Vec<String> {
        self.batches.lock().unwrap().clone()
    }

    /// Forget recorded batches and write counts.
    pub(crate) fn reset(&self) {
        self.batches.lock().unwrap().clear();
        self.writes.store(0, Ordering::SeqCst);
        self.begins.store(0, Ordering::SeqCst);
    }

    /// Number of parameterised writes (marker updates and inserts).
    pub(crate) fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Number of transactions opened.
    pub(crate) fn begins(&self) -> usize {
        self.begins.load(Ordering::SeqCst)
    }

    /// Make the next `commit` fail after rolling back.
    pub(crate) fn fail_next_commit(&self) {
        self.fail_commit.store(true, Ordering::SeqCst);
    }

    /// Make the next `begin` fail without opening a transaction.
    pub(crate) fn fail_next_begin(&self) {
        self.fail_begin.store(true, Ordering::SeqCst);
    }

    /// Set `flag` once `n` batches have executed.
    pub(crate) fn cancel_after(&self, n: usize, flag: CancelFlag) {
        *self.cancel_after.lock().unwrap() = Some((n, flag));
    }

    /// Count rows produced by `sql` on the wrapped database.
    pub(crate) fn count(&self, sql: &str) -> usize {
        self.inner.query_count(sql).unwrap()
    }
}

#[async_trait]
impl Database for RecordingDb {
    async fn execute_batch(&self, sql: &str) -> DbResult<()> {
        let seen = {
            let mut batches = self.batches.lock().unwrap();
            batches.push(sql.to_string());
            batches.len()
        };
        let result = self.inner.execute_batch(sql).await;
        if let Some((n, flag)) = self.cancel_after.lock().unwrap().as_ref() {
            if seen >= *n {
                flag.cancel();
            }
        }
        result
    }

    async fn execute_with_param(&self, sql: &str, value: &str) -> DbResult<usize> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.execute_with_param(sql, value).await
    }

    async fn query_text_column(&self, sql: &str) -> DbResult<Vec<String>> {
        self.inner.query_text_column(sql).await
    }

    async fn table_exists(&self, name: &str) -> DbResult<bool> {
        self.inner.table_exists(name).await
    }

    async fn begin(&self) -> DbResult<()> {
        self.begins.fetch_add(1, Ordering::SeqCst);
        if self.fail_begin.swap(false, Ordering::SeqCst) {
            return Err(DbError::ConnectionError("injected begin failure".to_string()));
        }
        self.inner.begin().await
    }

    async fn commit(&self) -> DbResult<()> {
        if self.fail_commit.swap(false, Ordering::SeqCst) {
            self.inner.rollback().await?;
            return Err(DbError::TransactionError("injected commit failure".to_string()));
        }
        self.inner.commit().await
    }

    async fn rollback(&self) -> DbResult<()> {
        self.inner.rollback().await
    }

    async fn lock_migrations(&self, key: i64) -> DbResult<()> {
        self.inner.lock_migrations(key).await
    }

    fn db_type(&self) -> &'static str {
        "recording"
    }
}

/// Write `<root>/<name>/up.sql` (and an empty down.sql).
pub(crate) fn write_unit(root: &Path, name: &str, up: &str) {
    let dir = root.join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("up.sql"), up).unwrap();
    fs::write(dir.join("down.sql"), "").unwrap();
}

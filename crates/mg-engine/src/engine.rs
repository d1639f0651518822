//! Pending-set resolution and atomic application.
//!
//! A run loads the catalog, opens one transaction, reads the marker, applies
//! every unit after it in catalog order, advances the marker to the last unit
//! applied, and commits. Any failure rolls the whole run back.

use crate::cancel::CancelFlag;
use crate::error::{EngineError, EngineResult};
use crate::tracker::Tracker;
use mg_core::config::{validate_table_name, DEFAULT_TRACKING_TABLE};
use mg_core::{MigrationCatalog, MigrationUnit};
use mg_db::Database;
use std::path::PathBuf;
use std::sync::Arc;

/// Knobs for a migration run.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Table holding the applied-migration marker
    pub tracking_table: String,

    /// Take the backend's migration lock for the duration of the run
    pub lock: bool,

    /// Checked before each unit and before commit
    pub cancel: CancelFlag,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            tracking_table: DEFAULT_TRACKING_TABLE.to_string(),
            lock: true,
            cancel: CancelFlag::new(),
        }
    }
}

/// Terminal status of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Nothing was pending
    UpToDate,
    /// These units were applied, in order, and committed
    Applied { applied: Vec<String> },
}

impl RunOutcome {
    /// Number of units applied by the run
    pub fn count(&self) -> usize {
        match self {
            RunOutcome::UpToDate => 0,
            RunOutcome::Applied { applied } => applied.len(),
        }
    }

    /// The marker value written by the run, if any
    pub fn marker(&self) -> Option<&str> {
        match self {
            RunOutcome::UpToDate => None,
            RunOutcome::Applied { applied } => applied.last().map(String::as_str),
        }
    }
}

/// Read-only view of where the database stands against the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationPlan {
    /// Recorded marker, `None` when nothing has been applied
    pub marker: Option<String>,

    /// Units at or before the marker
    pub applied: Vec<String>,

    /// Units after the marker, in the order a run would apply them
    pub pending: Vec<String>,
}

impl MigrationPlan {
    /// True when a run would apply nothing
    pub fn is_up_to_date(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Applies pending migrations from a catalog directory to one database.
pub struct Engine {
    db: Arc<dyn Database>,
    root: PathBuf,
    tracker: Tracker,
    options: EngineOptions,
}

impl Engine {
    /// Create an engine over an open connection.
    pub fn new(
        db: Arc<dyn Database>,
        root: impl Into<PathBuf>,
        options: EngineOptions,
    ) -> EngineResult<Self> {
        validate_table_name(&options.tracking_table)
            .map_err(EngineError::InvalidTrackingTable)?;
        Ok(Self {
            db,
            root: root.into(),
            tracker: Tracker::new(options.tracking_table.clone()),
            options,
        })
    }

    /// Connect to `url` and create an engine over the new connection.
    pub async fn connect(
        url: &str,
        root: impl Into<PathBuf>,
        options: EngineOptions,
    ) -> EngineResult<Self> {
        let db = mg_db::connect(url)
            .await
            .map_err(EngineError::Connection)?;
        Self::new(db, root, options)
    }

    /// The connection this engine drives
    pub fn database(&self) -> &Arc<dyn Database> {
        &self.db
    }

    /// Apply every pending migration in a single transaction.
    pub async fn run(&self) -> EngineResult<RunOutcome> {
        let catalog = MigrationCatalog::load(&self.root)?;
        log::debug!(
            "Loaded {} migrations from {}",
            catalog.len(),
            self.root.display()
        );
        self.check_cancelled()?;

        self.db.begin().await.map_err(EngineError::Transaction)?;

        let outcome = match self.apply_pending(&catalog).await {
            Ok(outcome) => outcome,
            Err(e) => {
                self.rollback().await;
                return Err(e);
            }
        };

        if let Err(e) = self.check_cancelled() {
            self.rollback().await;
            return Err(e);
        }

        if let Err(e) = self.db.commit().await {
            self.rollback().await;
            return Err(EngineError::Commit(e));
        }

        match &outcome {
            RunOutcome::UpToDate => log::info!("Migrations up to date"),
            RunOutcome::Applied { applied } => log::info!(
                "Applied {} migration(s); marker is now {}",
                applied.len(),
                outcome.marker().unwrap_or_default()
            ),
        }
        Ok(outcome)
    }

    /// Report applied and pending migrations without changing the database.
    ///
    /// The tracking table is probed but never created.
    pub async fn plan(&self) -> EngineResult<MigrationPlan> {
        let catalog = MigrationCatalog::load(&self.root)?;

        self.db.begin().await.map_err(EngineError::Transaction)?;
        let result = self.resolve_plan(&catalog).await;
        self.rollback().await;
        result
    }

    async fn resolve_plan(&self, catalog: &MigrationCatalog) -> EngineResult<MigrationPlan> {
        let db = self.db.as_ref();
        let marker = if self.tracker.exists(db).await? {
            self.tracker.read_marker(db).await?
        } else {
            None
        };

        let pending = pending_units(catalog, marker.as_deref())?;
        let applied_len = catalog.len() - pending.len();

        Ok(MigrationPlan {
            applied: names(&catalog.units()[..applied_len]),
            pending: names(pending),
            marker,
        })
    }

    /// Everything between `begin` and `commit`.
    async fn apply_pending(&self, catalog: &MigrationCatalog) -> EngineResult<RunOutcome> {
        let db = self.db.as_ref();

        if self.options.lock {
            log::debug!(
                "Acquiring migration lock on {} ({})",
                self.tracker.table(),
                db.db_type()
            );
            db.lock_migrations(self.tracker.lock_key())
                .await
                .map_err(EngineError::Tracking)?;
        }

        self.tracker.ensure_table(db).await?;
        let marker = self.tracker.read_marker(db).await?;
        let pending = pending_units(catalog, marker.as_deref())?;

        let Some(last) = pending.last() else {
            return Ok(RunOutcome::UpToDate);
        };

        let mut applied = Vec::with_capacity(pending.len());
        for unit in pending {
            self.check_cancelled()?;
            self.apply_unit(unit).await?;
            applied.push(unit.name.to_string());
        }

        self.tracker.write_marker(db, last.name.as_str()).await?;
        Ok(RunOutcome::Applied { applied })
    }

    async fn apply_unit(&self, unit: &MigrationUnit) -> EngineResult<()> {
        if unit.is_empty() {
            log::warn!("Migration {} has an empty up.sql; recording it as applied", unit.name);
            return Ok(());
        }

        log::info!("Applying {}", unit.name);
        self.db
            .execute_batch(&unit.up_sql)
            .await
            .map_err(|source| EngineError::Execution {
                name: unit.name.to_string(),
                source,
            })
    }

    async fn rollback(&self) {
        if let Err(e) = self.db.rollback().await {
            log::warn!("Rollback failed: {e}");
        }
    }

    fn check_cancelled(&self) -> EngineResult<()> {
        if self.options.cancel.is_cancelled() {
            Err(EngineError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Units strictly after `marker`; an unknown marker is an error.
fn pending_units<'a>(
    catalog: &'a MigrationCatalog,
    marker: Option<&str>,
) -> EngineResult<&'a [MigrationUnit]> {
    catalog
        .pending_after(marker)
        .map_err(|e| EngineError::StateInconsistency { marker: e.marker })
}

fn names(units: &[MigrationUnit]) -> Vec<String> {
    units.iter().map(|u| u.name.to_string()).collect()
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;

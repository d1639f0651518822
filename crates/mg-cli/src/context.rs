//! Settings resolution for CLI commands
//!
//! Precedence: command-line flag, then environment variable (both handled by
//! clap), then mg.yml, then built-in defaults. `GO_MG_MIGRATIONS_DIR` is read
//! after `MG_MIGRATIONS_DIR` and before mg.yml.

use anyhow::{Context, Result};
use mg_core::Config;
use mg_engine::{CancelFlag, EngineOptions};
use std::path::{Path, PathBuf};

use crate::cli::GlobalArgs;

/// Migrations-directory variable read by earlier releases
pub(crate) const LEGACY_MIGRATIONS_DIR_ENV: &str = "GO_MG_MIGRATIONS_DIR";

/// Resolved settings shared by every command
#[derive(Debug, Clone)]
pub(crate) struct Settings {
    /// Migration catalog root, if configured anywhere
    pub migrations_dir: Option<PathBuf>,

    /// Connection string, if configured anywhere
    pub database: Option<String>,

    /// Table holding the applied-migration marker
    pub tracking_table: String,

    /// Whether runs take the advisory lock
    pub lock: bool,
}

impl Settings {
    /// Resolve settings from global arguments and the optional config file
    pub(crate) fn load(global: &GlobalArgs) -> Result<Self> {
        let config = match &global.config {
            Some(path) => Config::load(Path::new(path))
                .with_context(|| format!("Failed to load configuration file {path}"))?,
            None => Config::load_from_dir(Path::new("."))
                .context("Failed to load mg.yml")?
                .unwrap_or_default(),
        };
        let legacy_dir = std::env::var(LEGACY_MIGRATIONS_DIR_ENV).ok();
        Ok(Self::merge(global, legacy_dir, config))
    }

    fn merge(global: &GlobalArgs, legacy_dir: Option<String>, config: Config) -> Self {
        Self {
            migrations_dir: global
                .migrations_dir
                .clone()
                .or(legacy_dir.filter(|dir| !dir.is_empty()))
                .or(config.migrations_dir)
                .map(PathBuf::from),
            database: global.database.clone().or(config.database),
            tracking_table: config.tracking_table,
            lock: config.lock,
        }
    }

    /// The migrations directory, or an error naming how to set it
    pub(crate) fn migrations_dir(&self) -> Result<&Path> {
        self.migrations_dir.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "No migrations directory configured. Pass --migrations-dir, set \
                 MG_MIGRATIONS_DIR, or add `migrations_dir` to mg.yml"
            )
        })
    }

    /// The connection string, or an error naming how to set it
    pub(crate) fn database(&self) -> Result<&str> {
        self.database.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "No database configured. Pass --database, set DATABASE_CONNECTION, \
                 or add `database` to mg.yml"
            )
        })
    }

    /// Engine options for a run
    pub(crate) fn engine_options(&self, cancel: CancelFlag) -> EngineOptions {
        EngineOptions {
            tracking_table: self.tracking_table.clone(),
            lock: self.lock,
            cancel,
        }
    }
}

#[cfg(test)]
#[path = "context_test.rs"]
mod tests;

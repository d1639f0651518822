//! Configuration types and parsing for mg.yml

use crate::error::{CoreError, CoreResult};
use serde::Deserialize;
use std::path::Path;

/// Default name of the table holding the applied-migration marker.
pub const DEFAULT_TRACKING_TABLE: &str = "migration";

/// Config file names probed by [`Config::load_from_dir`], in order.
pub const CONFIG_FILE_NAMES: &[&str] = &["mg.yml", "mg.yaml"];

/// Project configuration from mg.yml
///
/// Every field is optional; command-line flags and environment variables
/// take precedence over values set here.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory containing one subdirectory per migration
    #[serde(default)]
    pub migrations_dir: Option<String>,

    /// Database connection string (postgres URL or DuckDB path)
    #[serde(default)]
    pub database: Option<String>,

    /// Table that records the last applied migration
    #[serde(default = "default_tracking_table")]
    pub tracking_table: String,

    /// Take an advisory lock for the duration of a migration run
    #[serde(default = "default_true")]
    pub lock: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            migrations_dir: None,
            database: None,
            tracking_table: default_tracking_table(),
            lock: true,
        }
    }
}

fn default_tracking_table() -> String {
    DEFAULT_TRACKING_TABLE.to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::io(path, e))?;
        let config: Config =
            serde_yaml::from_str(&content).map_err(|e| CoreError::ConfigParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a directory, if it has one.
    ///
    /// Looks for mg.yml or mg.yaml. A directory without a config file yields
    /// `Ok(None)`.
    pub fn load_from_dir(dir: &Path) -> CoreResult<Option<Self>> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
            .map(|path| Self::load(&path))
            .transpose()
    }

    /// Validate the configuration
    fn validate(&self) -> CoreResult<()> {
        validate_table_name(&self.tracking_table)
    }
}

/// Check that `name` is `ident` or `schema.ident`.
///
/// The tracking table name is interpolated into DDL, so only plain SQL
/// identifiers are accepted.
pub fn validate_table_name(name: &str) -> CoreResult<()> {
    let parts: Vec<&str> = name.split('.').collect();
    if parts.len() > 2 || !parts.iter().all(|p| is_identifier(p)) {
        return Err(CoreError::ConfigInvalid {
            message: format!(
                "tracking_table '{name}' must be an identifier or schema.identifier \
                 ([A-Za-z_][A-Za-z0-9_]*)"
            ),
        });
    }
    Ok(())
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

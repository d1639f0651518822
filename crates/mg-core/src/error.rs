//! Error types for mg-core

use thiserror::Error;

/// Core error type for mg
#[derive(Error, Debug)]
pub enum CoreError {
    /// C001: Migration directory name does not end in `-<timestamp>`
    #[error("[C001] Malformed migration name '{name}': {reason}")]
    MalformedMigrationName { name: String, reason: String },

    /// C002: Required migration file is missing
    #[error("[C002] Migration '{name}' is missing required file {file}")]
    MissingMigrationFile { name: String, file: String },

    /// C003: Migrations directory not found
    #[error("[C003] Migrations directory not found: {path}")]
    CatalogNotFound { path: String },

    /// C004: IO error with file path context
    #[error("[C004] IO error at {path}: {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// C005: A migration with the same directory name already exists
    #[error("[C005] Migration already exists: {path}")]
    MigrationExists { path: String },

    /// C006: Label given to `create` cannot be used as a directory name
    #[error("[C006] Invalid migration label '{label}': {reason}")]
    InvalidLabel { label: String, reason: String },

    /// C007: Configuration file not found
    #[error("[C007] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// C008: Failed to parse configuration file
    #[error("[C008] Failed to parse config {path}: {message}")]
    ConfigParseError { path: String, message: String },

    /// C009: Invalid configuration value
    #[error("[C009] Invalid config: {message}")]
    ConfigInvalid { message: String },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Wrap an IO error with the path it occurred on.
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        CoreError::IoWithPath {
            path: path.display().to_string(),
            source,
        }
    }
}

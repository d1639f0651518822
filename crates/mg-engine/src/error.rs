//! Error types for the migration engine

use mg_core::CoreError;
use mg_db::DbError;
use thiserror::Error;

/// Migration engine errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// The on-disk catalog could not be read (G001)
    #[error("[G001] Migration catalog error: {0}")]
    Catalog(#[from] CoreError),

    /// The target database could not be reached (G002)
    #[error("[G002] Could not connect to database: {0}")]
    Connection(#[source] DbError),

    /// A pending migration's SQL failed; the run was rolled back (G003)
    #[error("[G003] Migration '{name}' failed: {source}")]
    Execution {
        name: String,
        #[source]
        source: DbError,
    },

    /// The recorded marker names no migration in the catalog (G004)
    #[error(
        "[G004] Recorded migration '{marker}' is not in the catalog; \
         refusing to guess where to resume"
    )]
    StateInconsistency { marker: String },

    /// Reading or writing the tracking table failed (G005)
    #[error("[G005] Migration tracking failed: {0}")]
    Tracking(#[source] DbError),

    /// The final commit failed (G006)
    #[error("[G006] Commit failed: {0}")]
    Commit(#[source] DbError),

    /// The run was cancelled before commit (G007)
    #[error("[G007] Migration run cancelled; no changes were committed")]
    Cancelled,

    /// The configured tracking table is not a usable identifier (G008)
    #[error("[G008] Invalid tracking table: {0}")]
    InvalidTrackingTable(#[source] CoreError),

    /// The tracking table holds more than one marker row (G009)
    #[error(
        "[G009] Tracking table '{table}' holds more than one marker ({}); \
         refusing to guess where to resume",
        .markers.join(", ")
    )]
    AmbiguousMarker { table: String, markers: Vec<String> },

    /// The run's transaction could not be opened (G010)
    #[error("[G010] Could not open transaction: {0}")]
    Transaction(#[source] DbError),
}

/// Result type alias for EngineError
pub type EngineResult<T> = Result<T, EngineError>;

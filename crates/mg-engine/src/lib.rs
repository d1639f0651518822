//! mg-engine - Migration engine for mg
//!
//! Resolves which migrations are pending against the marker recorded in the
//! target database and applies them in one transaction, advancing the marker
//! in the same transaction.

pub mod cancel;
pub mod engine;
pub mod error;
pub mod tracker;

#[cfg(test)]
pub(crate) mod test_utils;

pub use cancel::CancelFlag;
pub use engine::{Engine, EngineOptions, MigrationPlan, RunOutcome};
pub use error::{EngineError, EngineResult};
pub use tracker::Tracker;

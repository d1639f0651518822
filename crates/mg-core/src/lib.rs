//! mg-core - Core library for mg
//!
//! This crate provides the on-disk migration catalog (discovery, name parsing,
//! ordering), scaffolding for new migrations, and `mg.yml` configuration
//! parsing used by the engine and the CLI.

pub mod catalog;
pub mod config;
pub mod error;
pub mod migration;
pub mod migration_name;
pub mod scaffold;

pub use catalog::{MigrationCatalog, UnknownMarker};
pub use config::Config;
pub use error::{CoreError, CoreResult};
pub use migration::MigrationUnit;
pub use migration_name::MigrationName;
pub use scaffold::create_migration;

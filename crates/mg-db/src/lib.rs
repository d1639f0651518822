//! mg-db - Database abstraction layer for mg
//!
//! This crate provides the `Database` trait the migration engine drives, a
//! DuckDB implementation, and a PostgreSQL implementation behind the
//! `postgres` feature.

pub mod connect;
pub mod duckdb;
pub mod error;
#[cfg(feature = "postgres")]
pub mod postgres;
pub mod traits;

pub use connect::connect;
pub use duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
#[cfg(feature = "postgres")]
pub use postgres::PostgresBackend;
pub use traits::Database;

//! CLI command implementations

pub(crate) mod create;
pub(crate) mod migrate;
pub(crate) mod seed;
pub(crate) mod status;

//! Migration catalog discovery and ordering.
//!
//! The catalog is the set of migration directories under a root, sorted by
//! sequence key. Discovery is read-only and fails on the first bad entry.

use crate::error::{CoreError, CoreResult};
use crate::migration::MigrationUnit;
use std::path::Path;
use thiserror::Error;

/// A recorded marker that names no unit in the catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("marker '{marker}' does not match any migration in the catalog")]
pub struct UnknownMarker {
    /// The marker value that was looked up
    pub marker: String,
}

/// All migration units found on disk, in application order.
#[derive(Debug, Clone, Default)]
pub struct MigrationCatalog {
    units: Vec<MigrationUnit>,
}

impl MigrationCatalog {
    /// Discover and sort every migration under `root`.
    ///
    /// Each non-hidden subdirectory is one unit. Plain files are ignored.
    pub fn load(root: &Path) -> CoreResult<Self> {
        if !root.is_dir() {
            return Err(CoreError::CatalogNotFound {
                path: root.display().to_string(),
            });
        }

        let entries = std::fs::read_dir(root).map_err(|e| CoreError::io(root, e))?;
        let mut units = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|e| CoreError::io(root, e))?;
            let path = entry.path();
            let hidden = entry.file_name().to_string_lossy().starts_with('.');

            if hidden || !path.is_dir() {
                log::debug!("Skipping non-migration entry {}", path.display());
                continue;
            }

            units.push(MigrationUnit::load(&path)?);
        }

        Ok(Self::from_units(units))
    }

    /// Build a catalog from already-loaded units, sorting them.
    pub fn from_units(mut units: Vec<MigrationUnit>) -> Self {
        units.sort_by(|a, b| a.name.cmp(&b.name));

        for pair in units.windows(2) {
            if pair[0].sequence_key() == pair[1].sequence_key() {
                log::warn!(
                    "Migrations '{}' and '{}' share sequence key {}; ordering them by name",
                    pair[0].name,
                    pair[1].name,
                    pair[0].sequence_key()
                );
            }
        }

        Self { units }
    }

    /// Units in application order.
    pub fn units(&self) -> &[MigrationUnit] {
        &self.units
    }

    /// Number of units in the catalog.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// True when no migrations were found.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Index of the unit with exactly this name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.units.iter().position(|u| u.name == name)
    }

    /// Units strictly after `marker`, or the whole catalog when there is none.
    pub fn pending_after(&self, marker: Option<&str>) -> Result<&[MigrationUnit], UnknownMarker> {
        match marker {
            None => Ok(&self.units),
            Some(name) => self
                .position(name)
                .map(|i| &self.units[i + 1..])
                .ok_or_else(|| UnknownMarker {
                    marker: name.to_string(),
                }),
        }
    }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;

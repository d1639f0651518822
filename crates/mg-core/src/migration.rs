//! A single on-disk migration unit.

use crate::error::{CoreError, CoreResult};
use crate::migration_name::MigrationName;
use std::path::{Path, PathBuf};

/// File holding the forward SQL body.
pub const UP_FILE: &str = "up.sql";

/// File holding the reversal SQL body. Read but never executed.
pub const DOWN_FILE: &str = "down.sql";

/// One migration directory: its parsed name and SQL bodies.
#[derive(Debug, Clone)]
pub struct MigrationUnit {
    /// Parsed directory name
    pub name: MigrationName,

    /// Directory the unit was read from
    pub path: PathBuf,

    /// Contents of `up.sql`
    pub up_sql: String,

    /// Contents of `down.sql`, when present
    pub down_sql: Option<String>,
}

impl MigrationUnit {
    /// Read a migration unit from its directory.
    pub fn load(dir: &Path) -> CoreResult<Self> {
        let base = dir
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| CoreError::MalformedMigrationName {
                name: dir.display().to_string(),
                reason: "directory name is not valid UTF-8".to_string(),
            })?;
        let name = MigrationName::parse(base)?;

        let up_path = dir.join(UP_FILE);
        if !up_path.is_file() {
            return Err(CoreError::MissingMigrationFile {
                name: name.into_inner(),
                file: UP_FILE.to_string(),
            });
        }
        let up_sql = std::fs::read_to_string(&up_path).map_err(|e| CoreError::io(&up_path, e))?;

        let down_path = dir.join(DOWN_FILE);
        let down_sql = if down_path.is_file() {
            Some(std::fs::read_to_string(&down_path).map_err(|e| CoreError::io(&down_path, e))?)
        } else {
            None
        };

        Ok(Self {
            name,
            path: dir.to_path_buf(),
            up_sql,
            down_sql,
        })
    }

    /// The sequence key parsed from the name suffix.
    pub fn sequence_key(&self) -> u64 {
        self.name.sequence_key()
    }

    /// True when `up.sql` contains nothing but whitespace.
    pub fn is_empty(&self) -> bool {
        self.up_sql.trim().is_empty()
    }
}

//! Scaffolding for new, empty migrations.

use crate::error::{CoreError, CoreResult};
use crate::migration::{DOWN_FILE, UP_FILE};
use std::fs;
use std::path::{Path, PathBuf};

/// Create `<root>/<label>-<timestamp>/` with empty `up.sql` and `down.sql`.
///
/// Returns the path of the new migration directory. `root` is created when it
/// does not exist yet.
pub fn create_migration(root: &Path, label: &str, timestamp: u64) -> CoreResult<PathBuf> {
    validate_label(label)?;

    let dir = root.join(format!("{label}-{timestamp}"));
    if dir.exists() {
        return Err(CoreError::MigrationExists {
            path: dir.display().to_string(),
        });
    }

    fs::create_dir_all(&dir).map_err(|e| CoreError::io(&dir, e))?;
    for file in [UP_FILE, DOWN_FILE] {
        let path = dir.join(file);
        fs::write(&path, "").map_err(|e| CoreError::io(&path, e))?;
    }

    log::debug!("Created migration directory {}", dir.display());
    Ok(dir)
}

/// Reject labels that would not survive as a single directory name.
fn validate_label(label: &str) -> CoreResult<()> {
    let invalid = |reason: &str| CoreError::InvalidLabel {
        label: label.to_string(),
        reason: reason.to_string(),
    };

    if label.is_empty() {
        return Err(invalid("label must not be empty"));
    }
    if label.chars().any(char::is_whitespace) {
        return Err(invalid("spaces are not allowed"));
    }
    if label.contains('/') || label.contains('\\') || label.contains("..") {
        return Err(invalid("must not contain '/', '\\', or '..'"));
    }
    if label.starts_with('.') {
        return Err(invalid("must not start with '.'"));
    }
    Ok(())
}

#[cfg(test)]
#[path = "scaffold_test.rs"]
mod tests;

use super::*;
use std::fs;
use tempfile::TempDir;

/// Write a migration directory with the given up body and optional down body.
fn write_unit(root: &Path, name: &str, up: &str, down: Option<&str>) {
    let dir = root.join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("up.sql"), up).unwrap();
    if let Some(down) = down {
        fs::write(dir.join("down.sql"), down).unwrap();
    }
}

fn names(catalog: &MigrationCatalog) -> Vec<&str> {
    catalog.units().iter().map(|u| u.name.as_str()).collect()
}

#[test]
fn test_load_sorts_by_numeric_suffix() {
    let tmp = TempDir::new().unwrap();
    write_unit(tmp.path(), "a-100", "SELECT 1;", None);
    write_unit(tmp.path(), "c-300", "SELECT 3;", None);
    write_unit(tmp.path(), "b-20", "SELECT 2;", None);

    let catalog = MigrationCatalog::load(tmp.path()).unwrap();
    assert_eq!(names(&catalog), vec!["b-20", "a-100", "c-300"]);
}

#[test]
fn test_load_reads_bodies() {
    let tmp = TempDir::new().unwrap();
    write_unit(
        tmp.path(),
        "users-1",
        "CREATE TABLE users (id INT);",
        Some("DROP TABLE users;"),
    );

    let catalog = MigrationCatalog::load(tmp.path()).unwrap();
    let unit = &catalog.units()[0];
    assert_eq!(unit.name, "users-1");
    assert_eq!(unit.up_sql, "CREATE TABLE users (id INT);");
    assert_eq!(unit.down_sql.as_deref(), Some("DROP TABLE users;"));
    assert_eq!(unit.sequence_key(), 1);
}

#[test]
fn test_load_allows_missing_down_file() {
    let tmp = TempDir::new().unwrap();
    write_unit(tmp.path(), "users-1", "SELECT 1;", None);

    let catalog = MigrationCatalog::load(tmp.path()).unwrap();
    assert!(catalog.units()[0].down_sql.is_none());
}

#[test]
fn test_load_missing_up_file() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("users-1");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("down.sql"), "DROP TABLE users;").unwrap();

    let err = MigrationCatalog::load(tmp.path()).unwrap_err();
    assert!(
        matches!(err, CoreError::MissingMigrationFile { ref name, .. } if name == "users-1"),
        "unexpected error: {err}"
    );
}

#[test]
fn test_load_malformed_name() {
    let tmp = TempDir::new().unwrap();
    write_unit(tmp.path(), "users-latest", "SELECT 1;", None);

    let err = MigrationCatalog::load(tmp.path()).unwrap_err();
    assert!(matches!(err, CoreError::MalformedMigrationName { .. }));
}

#[test]
fn test_load_skips_files_and_hidden_dirs() {
    let tmp = TempDir::new().unwrap();
    write_unit(tmp.path(), "users-1", "SELECT 1;", None);
    fs::write(tmp.path().join("README.md"), "notes").unwrap();
    fs::create_dir_all(tmp.path().join(".git")).unwrap();

    let catalog = MigrationCatalog::load(tmp.path()).unwrap();
    assert_eq!(names(&catalog), vec!["users-1"]);
}

#[test]
fn test_load_missing_root() {
    let tmp = TempDir::new().unwrap();
    let err = MigrationCatalog::load(&tmp.path().join("nope")).unwrap_err();
    assert!(matches!(err, CoreError::CatalogNotFound { .. }));
}

#[test]
fn test_load_empty_root() {
    let tmp = TempDir::new().unwrap();
    let catalog = MigrationCatalog::load(tmp.path()).unwrap();
    assert!(catalog.is_empty());
    assert!(catalog.units().is_empty());
}

#[test]
fn test_duplicate_sequence_keys_ordered_by_name() {
    let tmp = TempDir::new().unwrap();
    write_unit(tmp.path(), "zeta-10", "SELECT 1;", None);
    write_unit(tmp.path(), "alpha-10", "SELECT 2;", None);

    let catalog = MigrationCatalog::load(tmp.path()).unwrap();
    assert_eq!(names(&catalog), vec!["alpha-10", "zeta-10"]);
}

#[test]
fn test_pending_after_none_is_everything() {
    let tmp = TempDir::new().unwrap();
    write_unit(tmp.path(), "u1-1", "SELECT 1;", None);
    write_unit(tmp.path(), "u2-2", "SELECT 2;", None);

    let catalog = MigrationCatalog::load(tmp.path()).unwrap();
    assert_eq!(catalog.pending_after(None).unwrap().len(), 2);
}

#[test]
fn test_pending_after_marker() {
    let tmp = TempDir::new().unwrap();
    for (i, name) in ["u1-1", "u2-2", "u3-3", "u4-4"].iter().enumerate() {
        write_unit(tmp.path(), name, &format!("SELECT {i};"), None);
    }

    let catalog = MigrationCatalog::load(tmp.path()).unwrap();
    let pending: Vec<&str> = catalog
        .pending_after(Some("u2-2"))
        .unwrap()
        .iter()
        .map(|u| u.name.as_str())
        .collect();
    assert_eq!(pending, vec!["u3-3", "u4-4"]);
    assert!(catalog.pending_after(Some("u4-4")).unwrap().is_empty());
}

#[test]
fn test_pending_after_unknown_marker() {
    let tmp = TempDir::new().unwrap();
    write_unit(tmp.path(), "u1-1", "SELECT 1;", None);

    let catalog = MigrationCatalog::load(tmp.path()).unwrap();
    let err = catalog.pending_after(Some("gone-9")).unwrap_err();
    assert_eq!(err.marker, "gone-9");
}

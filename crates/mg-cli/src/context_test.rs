use super::*;

fn global(migrations_dir: Option<&str>, database: Option<&str>) -> GlobalArgs {
    GlobalArgs {
        verbose: false,
        config: None,
        migrations_dir: migrations_dir.map(String::from),
        database: database.map(String::from),
    }
}

#[test]
fn test_flags_override_config() {
    let config = Config {
        migrations_dir: Some("from_config".to_string()),
        database: Some("config.duckdb".to_string()),
        ..Default::default()
    };

    let settings = Settings::merge(&global(Some("from_flag"), None), None, config);

    assert_eq!(settings.migrations_dir().unwrap(), Path::new("from_flag"));
    assert_eq!(settings.database().unwrap(), "config.duckdb");
}

#[test]
fn test_config_supplies_tracking_options() {
    let config = Config {
        tracking_table: "ops.marker".to_string(),
        lock: false,
        ..Default::default()
    };

    let settings = Settings::merge(&global(None, None), None, config);
    let options = settings.engine_options(CancelFlag::new());

    assert_eq!(options.tracking_table, "ops.marker");
    assert!(!options.lock);
}

#[test]
fn test_legacy_env_dir_between_flag_and_config() {
    let config = Config {
        migrations_dir: Some("from_config".to_string()),
        ..Default::default()
    };

    let settings = Settings::merge(
        &global(None, None),
        Some("from_legacy".into()),
        config.clone(),
    );
    assert_eq!(settings.migrations_dir().unwrap(), Path::new("from_legacy"));

    let settings = Settings::merge(
        &global(Some("from_flag"), None),
        Some("from_legacy".into()),
        config.clone(),
    );
    assert_eq!(settings.migrations_dir().unwrap(), Path::new("from_flag"));

    let settings = Settings::merge(&global(None, None), Some(String::new()), config);
    assert_eq!(settings.migrations_dir().unwrap(), Path::new("from_config"));
}

#[test]
fn test_missing_settings_are_errors() {
    let settings = Settings::merge(&global(None, None), None, Config::default());

    let err = settings.migrations_dir().unwrap_err().to_string();
    assert!(err.contains("MG_MIGRATIONS_DIR"));
    let err = settings.database().unwrap_err().to_string();
    assert!(err.contains("DATABASE_CONNECTION"));
}

#[test]
fn test_explicit_config_path_must_exist() {
    let dir = tempfile::tempdir().unwrap();
    let mut args = global(None, None);
    args.config = Some(dir.path().join("missing.yml").display().to_string());

    assert!(Settings::load(&args).is_err());
}

#[test]
fn test_explicit_config_path_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mg.yml");
    std::fs::write(&path, "migrations_dir: db/migrations\nlock: false\n").unwrap();
    let mut args = global(None, Some("app.duckdb"));
    args.config = Some(path.display().to_string());

    let settings = Settings::load(&args).unwrap();

    assert_eq!(settings.migrations_dir().unwrap(), Path::new("db/migrations"));
    assert_eq!(settings.database().unwrap(), "app.duckdb");
    assert!(!settings.lock);
}

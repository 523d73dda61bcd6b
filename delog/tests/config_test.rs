//! Tests for configuration loading and target/strategy resolution.
#![allow(clippy::unwrap_used)]

use delog::config::Config;
use delog::fix::Strategy;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_package_json_section() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("package.json"),
        r#"{
  "name": "web",
  "version": "1.0.0",
  "delog": {
    "methods": ["debug"],
    "removeSemicolonIfPossible": true,
    "strategy": "comment"
  }
}"#,
    )
    .unwrap();

    let config = Config::load_from_path(dir.path());

    assert_eq!(config.delog.methods, Some(vec!["debug".to_owned()]));
    assert_eq!(config.delog.remove_semicolon, Some(true));
    assert_eq!(config.delog.strategy().unwrap(), Some(Strategy::Comment));

    let targets = config.delog.target_spec().unwrap();
    assert!(targets.contains("console", "debug"));
    assert!(targets.contains("window.console", "debug"));
    assert!(!targets.contains("console", "log"));
}

#[test]
fn test_delog_toml_wins_over_package_json() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("package.json"),
        r#"{ "delog": { "methods": ["trace"] } }"#,
    )
    .unwrap();
    fs::write(
        dir.path().join(".delog.toml"),
        "[delog]\nnamespaces = [\"logger\"]\nmethods = [\"warn\"]\n",
    )
    .unwrap();

    let config = Config::load_from_path(dir.path());
    let targets = config.delog.target_spec().unwrap();

    assert!(targets.contains("logger", "warn"));
    assert!(!targets.contains("console", "trace"));
    assert!(config
        .config_file_path
        .unwrap()
        .ends_with(".delog.toml"));
}

#[test]
fn test_config_found_from_nested_file() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".delog.toml"),
        "[delog]\nexclude_folders = [\"dist\"]\nextensions = [\"js\"]\n",
    )
    .unwrap();
    let nested = dir.path().join("src/components");
    fs::create_dir_all(&nested).unwrap();
    let file = nested.join("button.js");
    fs::write(&file, "").unwrap();

    let config = Config::load_from_path(&file);
    assert_eq!(config.delog.exclude_folders, Some(vec!["dist".to_owned()]));
    assert_eq!(config.delog.extensions, Some(vec!["js".to_owned()]));
}

#[test]
fn test_invalid_values_surface_as_errors() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".delog.toml"),
        "[delog]\ntargets = [\"console\"]\nstrategy = \"erase\"\n",
    )
    .unwrap();

    let config = Config::load_from_path(dir.path());
    assert!(config.delog.target_spec().is_err());
    assert!(config.delog.strategy().is_err());
}

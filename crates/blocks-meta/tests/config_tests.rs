//! Integration tests for configuration loading

use std::fs;
use std::path::Path;

use blocks_core::{DEFAULT_MAX_DEPTH, HookPoint};
use blocks_meta::{CONFIG_FILE, Config, Error};
use tempfile::TempDir;

fn setup_config_file(temp: &TempDir, content: &str) -> std::path::PathBuf {
    let path = temp.path().join(CONFIG_FILE);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_missing_file_is_default() {
    let config = Config::load(Path::new("/nonexistent/blocks.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_load_full_config() {
    let temp = TempDir::new().unwrap();
    let path = setup_config_file(
        &temp,
        r#"
[render]
max_depth = 64

[auto_insert]
hook_point = "render"
metadata_dir = "/srv/blocks"
"#,
    );

    let config = Config::load(&path).unwrap();

    assert_eq!(config.render.max_depth, 64);
    assert_eq!(config.serialize_options().max_depth, 64);
    assert_eq!(config.auto_insert.hook_point, HookPoint::Render);
    assert_eq!(
        config.auto_insert.metadata_dir.as_deref(),
        Some(Path::new("/srv/blocks"))
    );
}

#[test]
fn test_empty_file_is_default() {
    let temp = TempDir::new().unwrap();
    let path = setup_config_file(&temp, "");

    let config = Config::load(&path).unwrap();
    assert_eq!(config.render.max_depth, DEFAULT_MAX_DEPTH);
    assert_eq!(config.auto_insert.hook_point, HookPoint::Tree);
}

#[test]
fn test_unknown_hook_point_rejected() {
    let temp = TempDir::new().unwrap();
    let path = setup_config_file(&temp, "[auto_insert]\nhook_point = \"later\"\n");

    let err = Config::load(&path).unwrap_err();
    assert!(matches!(err, Error::InvalidConfig { .. }));
    assert!(err.to_string().contains(CONFIG_FILE));
}

#[test]
fn test_malformed_toml_rejected() {
    let temp = TempDir::new().unwrap();
    let path = setup_config_file(&temp, "[render\nmax_depth = ");

    assert!(matches!(
        Config::load(&path),
        Err(Error::InvalidConfig { .. })
    ));
}

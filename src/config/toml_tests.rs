//! Tests for TOML configuration parsing.

use std::path::{Path, PathBuf};

use super::error::ConfigError;
use super::toml::{TomlConfig, default_config_template};

#[test]
fn parses_empty_config() {
    let config = TomlConfig::parse("").unwrap();

    assert!(config.collector.source.is_none());
    assert!(config.collector.timeout_secs.is_none());
    assert!(config.version.manifest.is_none());
}

#[test]
fn parses_full_config() {
    let config = TomlConfig::parse(
        r#"
        [collector]
        source = "native"
        timeout_secs = 20

        [version]
        manifest = "build/manifest.json"
        "#,
    )
    .unwrap();

    assert_eq!(config.collector.source.as_deref(), Some("native"));
    assert_eq!(config.collector.timeout_secs, Some(20));
    assert_eq!(
        config.version.manifest,
        Some(PathBuf::from("build/manifest.json"))
    );
}

#[test]
fn parses_partial_sections() {
    let config = TomlConfig::parse("[collector]\ntimeout_secs = 3\n").unwrap();

    assert_eq!(config.collector.timeout_secs, Some(3));
    assert!(config.collector.source.is_none());
    assert!(config.version.manifest.is_none());
}

#[test]
fn rejects_unknown_fields() {
    let result = TomlConfig::parse("[collector]\nretries = 5\n");

    assert!(matches!(result, Err(ConfigError::TomlParse(_))));
}

#[test]
fn rejects_unknown_sections() {
    let result = TomlConfig::parse("[webhook]\nurl = \"http://example.com\"\n");

    assert!(matches!(result, Err(ConfigError::TomlParse(_))));
}

#[test]
fn rejects_invalid_toml_syntax() {
    let result = TomlConfig::parse("[collector\nsource =");

    assert!(result.is_err());
}

#[test]
fn load_missing_file_is_file_read_error() {
    let result = TomlConfig::load(Path::new("nonexistent_config_file_12345.toml"));

    assert!(matches!(result, Err(ConfigError::FileRead { .. })));
}

#[test]
fn load_reads_file_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("netdeck.toml");
    std::fs::write(&path, "[collector]\nsource = \"powershell\"\n").unwrap();

    let config = TomlConfig::load(&path).unwrap();

    assert_eq!(config.collector.source.as_deref(), Some("powershell"));
}

#[test]
fn default_template_parses_cleanly() {
    let template = default_config_template();

    let config = TomlConfig::parse(&template).unwrap();

    // Every value in the template is commented out.
    assert!(config.collector.source.is_none());
    assert!(config.collector.timeout_secs.is_none());
    assert!(config.version.manifest.is_none());
}

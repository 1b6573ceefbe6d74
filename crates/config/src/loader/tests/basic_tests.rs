//! Builder tests that do not touch environment variables.

use std::fs;
use tempfile::TempDir;

use crate::loader::builder::ContainerBuilder;
use crate::loader::error::ConfigError;
use crate::loader::format::ConfigFormat;
use crate::provider::{ArrayProvider, ProviderError};
use crate::value::{Value, group};

#[test]
fn test_build_without_sources_uses_empty_array_provider() {
    let mut config = ContainerBuilder::new().build().unwrap();

    assert!(config.environment().is_none());
    assert!(config.load("default", false, true).unwrap().is_empty());
}

#[test]
fn test_build_with_provider_and_environment() {
    let provider = ArrayProvider::new()
        .with_group("default", group([("name", Value::from("default"))]))
        .with_environment_group("test", "default", group([("name", Value::from("test"))]));

    let mut config = ContainerBuilder::new()
        .with_provider(provider)
        .with_environment("test".to_string())
        .build()
        .unwrap();

    config.load("default", false, true).unwrap();
    assert_eq!(config.get("name", Value::Null, None), Value::from("test"));
}

#[test]
fn test_build_with_json_config_path() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("app.json"), r#"{"name": "json"}"#).unwrap();

    let mut config = ContainerBuilder::new()
        .with_config_path(temp_dir.path().to_path_buf())
        .build()
        .unwrap();

    config.load("app", true, true).unwrap();
    assert_eq!(config.get("app.name", Value::Null, None), Value::from("json"));
}

#[test]
fn test_build_with_yaml_config_path() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("app.yaml"), "name: yaml\n").unwrap();

    let mut config = ContainerBuilder::new()
        .with_config_path(temp_dir.path().to_path_buf())
        .with_format(ConfigFormat::Yaml)
        .build()
        .unwrap();

    config.load("app", true, true).unwrap();
    assert_eq!(config.get("app.name", Value::Null, None), Value::from("yaml"));
}

#[test]
fn test_explicit_provider_wins_over_config_path() {
    let provider = ArrayProvider::new().with_group("app", group([("name", Value::from("memory"))]));

    let mut config = ContainerBuilder::new()
        .with_config_path("/path/to/nowhere".into())
        .with_provider(provider)
        .build()
        .unwrap();

    config.load("app", true, true).unwrap();
    assert_eq!(config.get("app.name", Value::Null, None), Value::from("memory"));
}

#[test]
fn test_missing_config_path_is_an_error() {
    let result = ContainerBuilder::new()
        .with_config_path("/path/to/nowhere".into())
        .build();

    assert!(matches!(
        result,
        Err(ConfigError::Provider(ProviderError::InvalidPath { .. }))
    ));
}

//! Configuration file integration tests

use iotap_core::{Config, CoreError, DumpFormat};
use std::fs;
use std::path::PathBuf;

fn temp_config_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("iotap-{}-{}.toml", name, std::process::id()))
}

#[test]
fn test_load_full_config_file() {
    let path = temp_config_path("full");
    fs::write(
        &path,
        r#"
[logging]
level = "iotap::trace=debug"
json = true

[dump]
format = "text"
max_bytes = 0
read = true
write = false

[proxy]
listen = "127.0.0.1:17070"
upstream = "example.internal:443"
"#,
    )
    .unwrap();

    let config = Config::from_file(&path).unwrap();
    fs::remove_file(&path).ok();

    assert!(config.logging.json);
    assert_eq!(config.logging.level, "iotap::trace=debug");
    assert_eq!(config.dump.format, DumpFormat::Text);
    assert_eq!(config.dump.max_bytes, 0);
    assert!(config.dump.read);
    assert!(!config.dump.write);
    assert_eq!(config.proxy.upstream, "example.internal:443");
    assert!(config.validate().is_ok());
}

#[test]
fn test_empty_file_yields_defaults() {
    let path = temp_config_path("empty");
    fs::write(&path, "").unwrap();

    let config = Config::from_file(&path).unwrap();
    fs::remove_file(&path).ok();

    assert_eq!(config, Config::default());
}

#[test]
fn test_missing_file_is_io_error() {
    let path = temp_config_path("does-not-exist");
    let err = Config::from_file(&path).unwrap_err();
    assert!(matches!(err, CoreError::Io(_)));
}

#[test]
fn test_config_serialization_roundtrip() {
    let mut config = Config::default();
    config.dump.format = DumpFormat::Text;
    config.proxy.listen = "0.0.0.0:9999".to_string();

    let text = toml::to_string(&config).unwrap();
    let parsed = Config::from_toml_str(&text).unwrap();

    assert_eq!(parsed, config);
}

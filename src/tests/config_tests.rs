//! Tests for configuration loading.

use crate::config::{CONFIG_VERSION, ConfigError, LogLevel, RestoreConfig};

#[test]
fn test_defaults_match_upload_page() {
    let config = RestoreConfig::default();

    assert_eq!(config.version, CONFIG_VERSION);
    assert_eq!(config.endpoint, "/restore");
    assert_eq!(config.field_name, "file");
    assert_eq!(config.hidden_class, "hidden");
    assert_eq!(config.elements.form, "uploadForm");
    assert_eq!(config.elements.file_input, "fileInput");
    assert_eq!(config.elements.submit_button, "restoreBtn");
    assert_eq!(config.elements.loader, "loader");
    assert_eq!(config.elements.image, "restoredImage");
    assert_eq!(config.log_level, LogLevel::Info);
}

#[test]
fn test_json_round_trip() {
    let mut config = RestoreConfig::default();
    config.server_url = "https://restore.example.org".to_string();
    config.log_level = LogLevel::Debug;

    let json = config.to_json().expect("serialize");
    let loaded = RestoreConfig::from_json(&json).expect("parse");

    assert_eq!(loaded, config);
}

#[test]
fn test_missing_fields_use_defaults() {
    let config = RestoreConfig::from_json(
        r#"{ "server_url": "http://localhost:8000", "elements": { "image": "output" } }"#,
    )
    .expect("parse");

    assert_eq!(config.version, CONFIG_VERSION);
    assert_eq!(config.endpoint, "/restore");
    assert_eq!(config.elements.image, "output");
    assert_eq!(config.elements.form, "uploadForm");
    assert_eq!(config.request_url(), "http://localhost:8000/restore");
}

#[test]
fn test_newer_version_rejected() {
    let json = format!(r#"{{ "version": {} }}"#, CONFIG_VERSION + 1);

    match RestoreConfig::from_json(&json) {
        Err(ConfigError::VersionTooNew {
            file_version,
            supported_version,
        }) => {
            assert_eq!(file_version, CONFIG_VERSION + 1);
            assert_eq!(supported_version, CONFIG_VERSION);
        }
        other => panic!("expected VersionTooNew, got {:?}", other),
    }
}

#[test]
fn test_invalid_json_is_parse_error() {
    assert!(matches!(
        RestoreConfig::from_json("{ not json"),
        Err(ConfigError::ParseError(_))
    ));
}

#[test]
fn test_request_url_joining() {
    let mut config = RestoreConfig::default();
    assert_eq!(config.request_url(), "/restore");

    config.server_url = "http://host:8000".to_string();
    assert_eq!(config.request_url(), "http://host:8000/restore");

    config.server_url = "http://host:8000/api/".to_string();
    config.endpoint = "restore".to_string();
    assert_eq!(config.request_url(), "http://host:8000/api/restore");
}

#[test]
fn test_log_level_parsing() {
    assert_eq!("debug".parse::<LogLevel>(), Ok(LogLevel::Debug));
    assert_eq!("WARNING".parse::<LogLevel>(), Ok(LogLevel::Warn));
    assert!("loud".parse::<LogLevel>().is_err());
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
    assert_eq!(LogLevel::Error.to_level(), log::Level::Error);
}

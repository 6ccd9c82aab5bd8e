//! Integration tests for evdash-config crate.

use std::io::Write;

use evdash_common::LogFormat;
use evdash_config::{Config, ConfigLoader, ConfigValidator};

#[test]
fn test_default_config_validation() {
    let mut config = Config::default();
    assert!(ConfigValidator::validate(&config).is_ok());

    config.charts.top_makes = 0;
    assert!(ConfigValidator::validate(&config).is_err());
}

#[test]
fn test_yaml_round_trip_keeps_bins() {
    let config = Config::default();
    let yaml = serde_yaml::to_string(&config).expect("serialize");
    let parsed: Config = serde_yaml::from_str(&yaml).expect("parse");
    assert_eq!(parsed, config);
}

#[test]
fn test_logging_settings_convert() {
    let mut config = Config::default();
    config.logging.format = "compact".into();
    config.logging.level = "evdash_charts=debug".into();

    let logging = config.logging.to_logging_config().expect("valid format");
    assert_eq!(logging.format, LogFormat::Compact);
    assert_eq!(logging.level, "evdash_charts=debug");
    assert!(logging.file_path.is_none());
}

#[test]
fn test_load_from_file_reports_common_error() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(b"charts:\n  recent_year_window: 0\n")
        .expect("write");

    let err = ConfigLoader::load_from_file(file.path()).unwrap_err();
    assert!(err.is_user_error());
    assert!(err.to_string().contains("charts.recent_year_window"));
}

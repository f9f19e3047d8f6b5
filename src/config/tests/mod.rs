//! Unit tests for config module
//!
//! Tests configuration types, defaults, and serialization.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]

use std::fs;

use tempfile::TempDir;

use crate::{
    MediactlError,
    config::{Config, LogLevel, SortOrder},
    services::mpris::BusKind,
};

#[test]
fn config_default() {
    let config = Config::default();

    assert_eq!(config.general.log_level, LogLevel::Info);
    assert_eq!(config.media.bus, BusKind::Session);
    assert_eq!(config.media.sort, SortOrder::Recent);
    assert!(config.media.ignored_players.is_empty());
}

#[test]
fn config_serialize_toml() {
    let config = Config::default();

    let toml_str = toml::to_string(&config).unwrap();
    assert!(toml_str.contains("[general]"));
    assert!(toml_str.contains("[media]"));
    assert!(toml_str.contains("bus = \"session\""));
}

#[test]
fn config_deserialize_toml() {
    let toml_str = r#"
        [general]
        log_level = "debug"

        [media]
        bus = "system"
        ignored_players = ["chromium", "kdeconnect"]
        sort = "name"
    "#;

    let config = Config::from_toml(toml_str).unwrap();

    assert_eq!(config.general.log_level, LogLevel::Debug);
    assert_eq!(config.media.bus, BusKind::System);
    assert_eq!(config.media.sort, SortOrder::Name);
    assert_eq!(config.media.ignored_players, ["chromium", "kdeconnect"]);
}

#[test]
fn config_empty_toml() {
    let config = Config::from_toml("").unwrap();

    assert_eq!(config, Config::default());
}

#[test]
fn config_partial_media_section() {
    let config = Config::from_toml("[media]\nsort = \"name\"").unwrap();

    assert_eq!(config.media.sort, SortOrder::Name);
    assert_eq!(config.media.bus, BusKind::Session);
}

#[test]
fn config_rejects_unknown_bus() {
    let result = Config::from_toml("[media]\nbus = \"starship\"");

    assert!(matches!(result, Err(MediactlError::TomlParseError { .. })));
}

#[test]
fn config_rejects_empty_ignore_pattern() {
    let result = Config::from_toml("[media]\nignored_players = [\"\"]");

    assert!(matches!(result, Err(MediactlError::ConfigValidation { .. })));
}

#[test]
fn ignore_patterns_match_substrings() {
    let config = Config::from_toml("[media]\nignored_players = [\"chromium\"]").unwrap();

    assert!(config.media.is_ignored("chromium.instance1234"));
    assert!(!config.media.is_ignored("spotify"));
}

#[test]
fn load_missing_file_yields_defaults() {
    let temp_dir = TempDir::new().unwrap();

    let config = Config::load(&temp_dir.path().join("config.toml")).unwrap();

    assert_eq!(config, Config::default());
}

#[test]
fn load_reads_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, "[general]\nlog_level = \"trace\"\n").unwrap();

    let config = Config::load(&path).unwrap();

    assert_eq!(config.general.log_level, LogLevel::Trace);
}

#[test]
fn load_reports_parse_location() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, "[general\n").unwrap();

    match Config::load(&path) {
        Err(MediactlError::TomlParseError { location, .. }) => {
            assert!(location.ends_with("config.toml"));
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn log_level_display_matches_filter_syntax() {
    assert_eq!(LogLevel::Warn.to_string(), "warn");
    assert_eq!(LogLevel::Trace.to_string(), "trace");
}

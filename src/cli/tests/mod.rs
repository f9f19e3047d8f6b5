//! Unit tests for CLI module
//!
//! Tests argument parsing and config overrides.
//! No bus access or actual command execution.

#![allow(clippy::unwrap_used)]

use clap::Parser;

use crate::{
    cli::{BusArg, Cli, Commands},
    config::Config,
    services::mpris::BusKind,
};

#[test]
fn parses_list() {
    let cli = Cli::try_parse_from(["mediactl", "list"]).unwrap();

    assert_eq!(cli.command, Commands::List);
    assert!(cli.config.is_none());
    assert!(cli.bus.is_none());
}

#[test]
fn parses_status_with_prefer() {
    let cli = Cli::try_parse_from(["mediactl", "status", "--prefer", "spot"]).unwrap();

    assert_eq!(
        cli.command,
        Commands::Status {
            prefer: Some("spot".to_string())
        }
    );
}

#[test]
fn global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "mediactl",
        "watch",
        "--bus",
        "system",
        "--config",
        "/tmp/mediactl.toml",
    ])
    .unwrap();

    assert_eq!(cli.command, Commands::Watch);
    assert_eq!(cli.bus, Some(BusArg::System));
    assert_eq!(
        cli.config.as_deref(),
        Some(std::path::Path::new("/tmp/mediactl.toml"))
    );
}

#[test]
fn rejects_unknown_bus() {
    assert!(Cli::try_parse_from(["mediactl", "--bus", "nope", "list"]).is_err());
}

#[test]
fn requires_subcommand() {
    assert!(Cli::try_parse_from(["mediactl"]).is_err());
}

#[test]
fn bus_flag_overrides_config() {
    let cli = Cli::try_parse_from(["mediactl", "-b", "system", "list"]).unwrap();

    let config = cli.apply_overrides(Config::default());

    assert_eq!(config.media.bus, BusKind::System);
}

#[test]
fn config_bus_kept_without_flag() {
    let cli = Cli::try_parse_from(["mediactl", "list"]).unwrap();
    let mut config = Config::default();
    config.media.bus = BusKind::System;

    let config = cli.apply_overrides(config);

    assert_eq!(config.media.bus, BusKind::System);
}

#[test]
fn only_watch_is_long_running() {
    assert!(Commands::Watch.is_long_running());
    assert!(!Commands::List.is_long_running());
    assert!(!Commands::Status { prefer: None }.is_long_running());
}

#[test]
fn parses_transport_commands() {
    let cli = Cli::try_parse_from(["mediactl", "play-pause"]).unwrap();
    assert_eq!(cli.command, Commands::PlayPause { player: None });

    let cli = Cli::try_parse_from(["mediactl", "next", "spotify"]).unwrap();
    assert_eq!(
        cli.command,
        Commands::Next {
            player: Some("spotify".to_string())
        }
    );

    let cli = Cli::try_parse_from(["mediactl", "previous", "2"]).unwrap();
    assert_eq!(
        cli.command,
        Commands::Previous {
            player: Some("2".to_string())
        }
    );
}

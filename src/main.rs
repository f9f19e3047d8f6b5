//! mediactl - watch and inspect MPRIS media players on D-Bus.

use std::{error::Error, process};

use clap::Parser;
use mediactl::{
    cli::{Cli, formatting::format_error},
    config::{Config, ConfigPaths},
    tracing_config,
};
use tracing::{Level, span};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => ConfigPaths::main_config()?,
    };
    let config = match Config::load(&config_path) {
        Ok(config) => cli.apply_overrides(config),
        Err(e) => {
            eprintln!("{}", format_error(&e.to_string()));
            process::exit(1);
        }
    };

    if cli.command.is_long_running() {
        tracing_config::init_with_file(config.general.log_level)?;
    } else {
        tracing_config::init(config.general.log_level)?;
    }
    let _span = span!(Level::INFO, "mediactl").entered();

    match cli.execute(config).await {
        Ok(output) => {
            if !output.trim().is_empty() {
                println!("{output}");
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", format_error(&e.to_string()));
            process::exit(1);
        }
    }
}

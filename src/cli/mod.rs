//! Command-line interface for inspecting MPRIS players.
//!
//! Every command opens a [`PlayerManager`](crate::services::PlayerManager)
//! session on the configured bus, then reads or watches it.

mod commands;
pub mod formatting;
mod types;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::{config::Config, services::mpris::BusKind};

use commands::{PlayerSession, Transport};
pub use types::{CliError, CommandResult};

/// Track and control MPRIS media players
#[derive(Parser, Debug)]
#[command(name = "mediactl", version)]
#[command(about = "Track and control MPRIS media players")]
pub struct Cli {
    /// Configuration file [default: $XDG_CONFIG_HOME/mediactl/config.toml]
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Bus to watch, overriding the configuration
    #[arg(short, long, global = true, value_enum)]
    pub bus: Option<BusArg>,

    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List the IDs of all players on the bus
    List,

    /// Show identity and playback state of every player
    Status {
        /// Put the first player whose ID contains this text on top
        #[arg(long)]
        prefer: Option<String>,
    },

    /// Print players appearing and vanishing until interrupted
    Watch,

    /// Toggle play/pause
    PlayPause {
        /// Player index (1, 2, ...) or part of its ID [default: top player]
        player: Option<String>,
    },

    /// Skip to the next track
    Next {
        /// Player index (1, 2, ...) or part of its ID [default: top player]
        player: Option<String>,
    },

    /// Go back to the previous track
    Previous {
        /// Player index (1, 2, ...) or part of its ID [default: top player]
        player: Option<String>,
    },
}

impl Commands {
    /// Whether the command runs until interrupted
    pub fn is_long_running(&self) -> bool {
        matches!(self, Commands::Watch)
    }
}

/// Command-line spelling of [`BusKind`]
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusArg {
    /// Per-login-session bus
    Session,
    /// System-wide bus
    System,
}

impl From<BusArg> for BusKind {
    fn from(bus: BusArg) -> Self {
        match bus {
            BusArg::Session => BusKind::Session,
            BusArg::System => BusKind::System,
        }
    }
}

impl Cli {
    /// Apply command-line overrides to the loaded configuration
    pub fn apply_overrides(&self, mut config: Config) -> Config {
        if let Some(bus) = self.bus {
            config.media.bus = bus.into();
        }
        config
    }

    /// Run the selected command.
    ///
    /// # Errors
    ///
    /// Returns CliError if the bus is unreachable or the command fails
    pub async fn execute(&self, config: Config) -> CommandResult {
        let session = PlayerSession::open(config.media).await?;

        match &self.command {
            Commands::List => commands::list(&session),
            Commands::Status { prefer } => commands::status(&session, prefer.as_deref()).await,
            Commands::Watch => commands::watch(&session).await,
            Commands::PlayPause { player } => {
                commands::control(&session, Transport::PlayPause, player.as_deref()).await
            }
            Commands::Next { player } => {
                commands::control(&session, Transport::Next, player.as_deref()).await
            }
            Commands::Previous { player } => {
                commands::control(&session, Transport::Previous, player.as_deref()).await
            }
        }
    }
}

#[cfg(test)]
mod tests;

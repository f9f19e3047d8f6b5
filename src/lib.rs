//! mediactl - MPRIS media player tracking over D-Bus.
//!
//! The heart of the crate is [`PlayerManager`](services::PlayerManager),
//! which turns the bus daemon's `NameOwnerChanged` notifications into
//! player-appeared and player-vanished events and keeps an ordered
//! collection of the players a caller chose to control.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use mediactl::services::mpris::{BusKind, DbusNameOwnerBus, MprisPlayer, PlayerManager};
//!
//! # async fn example() -> Result<(), mediactl::services::MediaError> {
//! let bus = DbusNameOwnerBus::connect(BusKind::Session).await?;
//! let manager: Arc<PlayerManager<MprisPlayer>> = PlayerManager::new(Arc::new(bus)).await?;
//!
//! manager.events().on_name_appeared(|event| println!("{} appeared", event.name));
//! println!("Players: {:?}", manager.player_names());
//! # Ok(())
//! # }
//! ```

/// Configuration schema definitions and loading.
pub mod config;

/// Core error types and result aliases.
pub mod core;

/// Command-line interface.
pub mod cli;

/// Player tracking services.
pub mod services;

/// Logging setup.
pub mod tracing_config;

/// Re-exported core types for convenience.
pub use crate::core::{MediactlError, Result};

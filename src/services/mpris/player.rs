use std::{fmt, sync::Arc};

use tracing::instrument;
use zbus::Connection;

use super::{MediaError, MediaPlayer2PlayerProxy, MediaPlayer2Proxy, bus_name::bus_name_for};

/// Capability the player manager needs from a player handle.
///
/// The manager never drives playback. It only needs the player ID to find
/// the handle again when the matching bus name vanishes.
pub trait ManagedPlayer: Send + Sync + 'static {
    /// Player ID this handle controls (bus name without the MPRIS prefix)
    fn player_id(&self) -> &str;
}

/// Current playback state of a media player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Player is currently playing
    Playing,

    /// Player is paused
    Paused,

    /// Player is stopped
    Stopped,
}

impl From<&str> for PlaybackState {
    fn from(status: &str) -> Self {
        match status {
            "Playing" => Self::Playing,
            "Paused" => Self::Paused,
            _ => Self::Stopped,
        }
    }
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Playing => write!(f, "Playing"),
            Self::Paused => write!(f, "Paused"),
            Self::Stopped => write!(f, "Stopped"),
        }
    }
}

/// Controllable MPRIS player reached over D-Bus
pub struct MprisPlayer {
    player_id: String,
    base_proxy: MediaPlayer2Proxy<'static>,
    player_proxy: MediaPlayer2PlayerProxy<'static>,
}

impl MprisPlayer {
    /// Connect to the player with the given ID.
    ///
    /// # Errors
    /// Returns `MediaError::DbusError` if the bus name is invalid or proxy creation fails
    #[instrument(skip(connection))]
    pub async fn connect(connection: &Connection, player_id: &str) -> Result<Arc<Self>, MediaError> {
        let bus_name = bus_name_for(player_id);

        let base_proxy = MediaPlayer2Proxy::builder(connection)
            .destination(bus_name.clone())
            .map_err(MediaError::DbusError)?
            .build()
            .await
            .map_err(MediaError::DbusError)?;

        let player_proxy = MediaPlayer2PlayerProxy::builder(connection)
            .destination(bus_name)
            .map_err(MediaError::DbusError)?
            .build()
            .await
            .map_err(MediaError::DbusError)?;

        Ok(Arc::new(Self {
            player_id: player_id.to_string(),
            base_proxy,
            player_proxy,
        }))
    }

    /// Human-readable player name, falling back to the player ID
    pub async fn identity(&self) -> String {
        self.base_proxy
            .identity()
            .await
            .unwrap_or_else(|_| self.player_id.clone())
    }

    /// Current playback state
    ///
    /// # Errors
    /// Returns `MediaError::DbusError` if the property read fails
    pub async fn playback_state(&self) -> Result<PlaybackState, MediaError> {
        let status = self.player_proxy.playback_status().await?;
        Ok(PlaybackState::from(status.as_str()))
    }

    /// Toggle between playing and paused
    ///
    /// # Errors
    /// Returns `MediaError::DbusError` if the call fails
    pub async fn play_pause(&self) -> Result<(), MediaError> {
        self.player_proxy.play_pause().await?;
        Ok(())
    }

    /// Skip to the next track
    ///
    /// # Errors
    /// Returns `MediaError::DbusError` if the call fails
    pub async fn next(&self) -> Result<(), MediaError> {
        self.player_proxy.next().await?;
        Ok(())
    }

    /// Go back to the previous track
    ///
    /// # Errors
    /// Returns `MediaError::DbusError` if the call fails
    pub async fn previous(&self) -> Result<(), MediaError> {
        self.player_proxy.previous().await?;
        Ok(())
    }
}

impl ManagedPlayer for MprisPlayer {
    fn player_id(&self) -> &str {
        &self.player_id
    }
}

impl fmt::Debug for MprisPlayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MprisPlayer")
            .field("player_id", &self.player_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playback_state_parses_mpris_status() {
        assert_eq!(PlaybackState::from("Playing"), PlaybackState::Playing);
        assert_eq!(PlaybackState::from("Paused"), PlaybackState::Paused);
        assert_eq!(PlaybackState::from("Stopped"), PlaybackState::Stopped);
        assert_eq!(PlaybackState::from("garbage"), PlaybackState::Stopped);
    }
}

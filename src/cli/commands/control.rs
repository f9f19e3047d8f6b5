use std::sync::Arc;

use crate::{
    cli::CommandResult,
    services::mpris::{ManagedPlayer, MediaError, MprisPlayer},
};

use super::PlayerSession;

/// Transport action sent to a single player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Transport {
    PlayPause,
    Next,
    Previous,
}

/// Sends a transport action to one player.
///
/// `player` is a 1-based index into the managed list or part of a player
/// ID. Without it the player on top of the list is used.
///
/// # Errors
///
/// Returns CliError if no player matches or the call fails
pub(crate) async fn execute(
    session: &PlayerSession,
    action: Transport,
    player: Option<&str>,
) -> CommandResult {
    session.manage_known_players().await;

    let players = session.manager().players();
    let target = select(&players, player)?;
    let identity = target.identity().await;

    match action {
        Transport::PlayPause => target.play_pause().await?,
        Transport::Next => target.next().await?,
        Transport::Previous => target.previous().await?,
    }

    let verb = match action {
        Transport::PlayPause => "Toggled playback for",
        Transport::Next => "Skipped to next track on",
        Transport::Previous => "Went back a track on",
    };
    Ok(format!("{verb}: {identity}"))
}

fn select(
    players: &[Arc<MprisPlayer>],
    selector: Option<&str>,
) -> Result<Arc<MprisPlayer>, MediaError> {
    let found = match selector {
        None => players.first(),
        Some(selector) => match selector.parse::<usize>() {
            Ok(index) if index > 0 => players.get(index - 1),
            _ => players
                .iter()
                .find(|player| player.player_id().contains(selector)),
        },
    };

    found
        .cloned()
        .ok_or_else(|| MediaError::PlayerNotFound(selector.unwrap_or("any").to_string()))
}

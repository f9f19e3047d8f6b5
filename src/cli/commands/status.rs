use crate::{
    cli::{
        CliError, CommandResult,
        formatting::{format_header, format_player_status},
    },
    services::mpris::ManagedPlayer,
};

use super::PlayerSession;

/// Shows identity and playback state of every managed player.
///
/// `prefer` promotes the first player whose ID contains it to the top.
///
/// # Errors
///
/// Returns CliError if `prefer` matches no managed player
pub(crate) async fn execute(session: &PlayerSession, prefer: Option<&str>) -> CommandResult {
    session.manage_known_players().await;
    let manager = session.manager();

    if let Some(prefer) = prefer {
        let player = manager
            .players()
            .into_iter()
            .find(|player| player.player_id().contains(prefer))
            .ok_or_else(|| CliError::InvalidArgument {
                arg: "prefer".to_string(),
                reason: format!("No player found matching '{prefer}'"),
            })?;
        manager.move_to_top(&player);
    }

    let players = manager.players();
    if players.is_empty() {
        return Ok("No players found".to_string());
    }

    let mut output = format_header(&format!("{} player(s)", players.len()));
    for (index, player) in players.iter().enumerate() {
        let identity = player.identity().await;
        let state = player.playback_state().await.ok();

        output.push('\n');
        output.push_str(&format_player_status(
            index + 1,
            &identity,
            player.player_id(),
            state,
        ));
    }

    Ok(output)
}

use tokio::signal;
use tracing::info;

use crate::{
    cli::{CommandResult, formatting::format_event},
    services::mpris::ManagedPlayer,
};

use super::PlayerSession;

/// Prints name and player events until interrupted.
///
/// Every non-ignored player that appears is managed, so both the name
/// and the player lifecycle show up in the output.
///
/// # Errors
///
/// Returns CliError if the interrupt handler cannot be installed
pub(crate) async fn execute(session: &PlayerSession) -> CommandResult {
    let manager = session.manager();
    let events = manager.events();

    events.on_name_appeared(|event| println!("{}", format_event(true, "name", &event.name)));
    events.on_name_vanished(|event| println!("{}", format_event(false, "name", &event.name)));
    events.on_player_appeared(|player| {
        println!("{}", format_event(true, "player", player.player_id()));
    });
    events.on_player_vanished(|player| {
        println!("{}", format_event(false, "player", player.player_id()));
    });
    events.on_name_appeared(session.manage_on_appear());

    for name in manager.player_names() {
        println!("{}", format_event(true, "name", &name));
    }
    session.manage_known_players().await;

    info!("Watching for player changes");
    signal::ctrl_c().await?;

    Ok(String::new())
}

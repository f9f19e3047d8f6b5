use crate::cli::CommandResult;

use super::PlayerSession;

/// Lists the IDs of every MPRIS player on the bus, most recent first
pub(crate) fn execute(session: &PlayerSession) -> CommandResult {
    let names = session.manager().player_names();

    if names.is_empty() {
        return Ok("No players found".to_string());
    }

    Ok(names.join("\n"))
}

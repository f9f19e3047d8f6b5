/// Well-known name prefix every MPRIS player registers under
pub const MPRIS_PREFIX: &str = "org.mpris.MediaPlayer2.";

/// Strip the MPRIS prefix from a bus name.
///
/// Returns `None` for names outside the MPRIS namespace and for the bare
/// prefix itself, which names no player.
pub fn player_id_from_bus_name(bus_name: &str) -> Option<&str> {
    bus_name
        .strip_prefix(MPRIS_PREFIX)
        .filter(|player_id| !player_id.is_empty())
}

/// Full bus name a player with the given ID is reachable at
pub fn bus_name_for(player_id: &str) -> String {
    format!("{MPRIS_PREFIX}{player_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_prefix() {
        assert_eq!(
            player_id_from_bus_name("org.mpris.MediaPlayer2.spotify"),
            Some("spotify")
        );
        assert_eq!(
            player_id_from_bus_name("org.mpris.MediaPlayer2.vlc.instance4242"),
            Some("vlc.instance4242")
        );
    }

    #[test]
    fn rejects_foreign_and_empty_names() {
        assert_eq!(player_id_from_bus_name("org.freedesktop.Notifications"), None);
        assert_eq!(player_id_from_bus_name("org.mpris.MediaPlayer2."), None);
        assert_eq!(player_id_from_bus_name("org.mpris.MediaPlayer2"), None);
        assert_eq!(player_id_from_bus_name(":1.42"), None);
        assert_eq!(player_id_from_bus_name(""), None);
    }

    #[test]
    fn bus_name_round_trips_player_id() {
        let bus_name = bus_name_for("mpv");

        assert_eq!(bus_name, "org.mpris.MediaPlayer2.mpv");
        assert_eq!(player_id_from_bus_name(&bus_name), Some("mpv"));
    }
}

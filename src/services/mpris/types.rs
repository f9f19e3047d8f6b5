use std::fmt;

use super::bus_name::player_id_from_bus_name;

/// Payload of the name-appeared and name-vanished events
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NameEvent {
    /// Player ID (bus name without the MPRIS prefix)
    pub name: String,
}

impl NameEvent {
    /// Create an event for the given player ID
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for NameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// One raw `NameOwnerChanged` notification from the bus daemon.
///
/// An empty owner string means "no owner".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameOwnerChange {
    /// Full bus name whose owner changed
    pub name: String,

    /// Unique name of the previous owner
    pub old_owner: String,

    /// Unique name of the new owner
    pub new_owner: String,
}

impl NameOwnerChange {
    /// Build a notification from its three string fields
    pub fn new(
        name: impl Into<String>,
        old_owner: impl Into<String>,
        new_owner: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            old_owner: old_owner.into(),
            new_owner: new_owner.into(),
        }
    }

    /// Decide what this notification means for the player registry.
    ///
    /// Owner hand-offs (both owners set) and no-op transitions are
    /// irrelevant, as is anything outside the MPRIS namespace.
    pub fn classify(&self) -> NameChange {
        let Some(player_id) = player_id_from_bus_name(&self.name) else {
            return NameChange::Irrelevant;
        };

        match (self.old_owner.is_empty(), self.new_owner.is_empty()) {
            (false, true) => NameChange::Vanished(player_id.to_string()),
            (true, false) => NameChange::Appeared(player_id.to_string()),
            _ => NameChange::Irrelevant,
        }
    }
}

/// Meaning of a classified ownership change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameChange {
    /// A player gained an owner
    Appeared(String),

    /// A player lost its owner
    Vanished(String),

    /// Nothing to do
    Irrelevant,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPOTIFY: &str = "org.mpris.MediaPlayer2.spotify";

    #[test]
    fn new_owner_means_appeared() {
        let change = NameOwnerChange::new(SPOTIFY, "", ":1.5");
        assert_eq!(change.classify(), NameChange::Appeared("spotify".to_string()));
    }

    #[test]
    fn lost_owner_means_vanished() {
        let change = NameOwnerChange::new(SPOTIFY, ":1.5", "");
        assert_eq!(change.classify(), NameChange::Vanished("spotify".to_string()));
    }

    #[test]
    fn owner_handoff_is_irrelevant() {
        let change = NameOwnerChange::new(SPOTIFY, ":1.5", ":1.9");
        assert_eq!(change.classify(), NameChange::Irrelevant);
    }

    #[test]
    fn ownerless_change_is_irrelevant() {
        let change = NameOwnerChange::new(SPOTIFY, "", "");
        assert_eq!(change.classify(), NameChange::Irrelevant);
    }

    #[test]
    fn foreign_names_are_irrelevant_regardless_of_owners() {
        for (old, new) in [("", ":1.5"), (":1.5", ""), (":1.5", ":1.6"), ("", "")] {
            let change = NameOwnerChange::new("org.freedesktop.Notifications", old, new);
            assert_eq!(change.classify(), NameChange::Irrelevant);

            let bare_prefix = NameOwnerChange::new("org.mpris.MediaPlayer2.", old, new);
            assert_eq!(bare_prefix.classify(), NameChange::Irrelevant);
        }
    }

    #[test]
    fn name_event_displays_player_id() {
        assert_eq!(NameEvent::new("mpv").to_string(), "mpv");
    }
}

use serde::{Deserialize, Serialize};

use crate::services::mpris::BusKind;

/// Order in which managed players are listed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Most recently managed or promoted first
    #[default]
    Recent,

    /// Alphabetical by player ID
    Name,
}

/// Media player tracking configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct MediaConfig {
    /// Bus to watch for players
    pub bus: BusKind,

    /// Player ID substrings that should never be managed
    pub ignored_players: Vec<String>,

    /// Order of managed players
    pub sort: SortOrder,
}

impl MediaConfig {
    /// Whether a player ID matches any ignore pattern
    pub fn is_ignored(&self, player_id: &str) -> bool {
        self.ignored_players
            .iter()
            .any(|pattern| player_id.contains(pattern.as_str()))
    }
}

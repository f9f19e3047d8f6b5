use super::bus_name::player_id_from_bus_name;

/// Ordered set of player IDs currently owned on the bus.
///
/// Seeded from a full `ListNames` enumeration, then kept current one entry
/// at a time. Newly appeared players go to the front.
#[derive(Debug, Default, Clone)]
pub struct NameRegistry {
    names: Vec<String>,
}

impl NameRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents with the MPRIS players found in `bus_names`.
    ///
    /// Keeps enumeration order. Non-MPRIS names and repeats are skipped.
    pub fn seed<I, S>(&mut self, bus_names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.names.clear();
        for bus_name in bus_names {
            let Some(player_id) = player_id_from_bus_name(bus_name.as_ref()) else {
                continue;
            };
            if !self.contains(player_id) {
                self.names.push(player_id.to_string());
            }
        }
    }

    /// Whether the player ID is tracked
    pub fn contains(&self, player_id: &str) -> bool {
        self.names.iter().any(|name| name == player_id)
    }

    /// Track a player at the front. Returns `false` if it was already tracked.
    pub fn insert_front(&mut self, player_id: &str) -> bool {
        if self.contains(player_id) {
            return false;
        }
        self.names.insert(0, player_id.to_string());
        true
    }

    /// Stop tracking a player. Returns `false` if it was not tracked.
    pub fn remove(&mut self, player_id: &str) -> bool {
        match self.names.iter().position(|name| name == player_id) {
            Some(index) => {
                self.names.remove(index);
                true
            }
            None => false,
        }
    }

    /// Tracked player IDs, most recently appeared first
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of tracked players
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no players are tracked
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

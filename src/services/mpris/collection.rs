use std::{cmp::Ordering, fmt, sync::Arc};

use super::ManagedPlayer;

type CompareFn<P> = dyn Fn(&P, &P) -> Ordering + Send + Sync;

/// Sort order for managed players.
///
/// Owns whatever context its comparator needs. Dropping the sort drops
/// the context with it, so replacing a sort releases the old context.
pub struct PlayerSort<P> {
    compare: Box<CompareFn<P>>,
}

impl<P: 'static> PlayerSort<P> {
    /// Sort with a comparator that consults an owned context value
    pub fn new<C, F>(context: C, compare: F) -> Self
    where
        C: Send + Sync + 'static,
        F: Fn(&P, &P, &C) -> Ordering + Send + Sync + 'static,
    {
        Self {
            compare: Box::new(move |a, b| compare(a, b, &context)),
        }
    }

    /// Sort with a context-free comparator
    pub fn by<F>(compare: F) -> Self
    where
        F: Fn(&P, &P) -> Ordering + Send + Sync + 'static,
    {
        Self {
            compare: Box::new(compare),
        }
    }
}

impl<P> PlayerSort<P> {
    /// Three-way comparison of two players
    pub fn compare(&self, a: &P, b: &P) -> Ordering {
        (self.compare)(a, b)
    }
}

impl<P> fmt::Debug for PlayerSort<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlayerSort").finish_non_exhaustive()
    }
}

/// Ordered set of managed player handles.
///
/// Membership is by handle identity, not by value: two handles for the
/// same player ID are distinct entries.
pub struct PlayerCollection<P> {
    players: Vec<Arc<P>>,
}

impl<P> Default for PlayerCollection<P> {
    fn default() -> Self {
        Self {
            players: Vec::new(),
        }
    }
}

impl<P: ManagedPlayer> PlayerCollection<P> {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether this exact handle is in the collection
    pub fn contains(&self, handle: &Arc<P>) -> bool {
        self.position(handle).is_some()
    }

    /// Add a handle.
    ///
    /// With a sort, the handle goes before the first entry that does not
    /// sort ahead of it. Without one it goes to the front. Returns `false`
    /// if the handle was already present.
    pub fn insert(&mut self, handle: Arc<P>, sort: Option<&PlayerSort<P>>) -> bool {
        if self.contains(&handle) {
            return false;
        }

        let index = match sort {
            Some(sort) => self
                .players
                .iter()
                .position(|existing| sort.compare(&handle, existing) != Ordering::Greater)
                .unwrap_or(self.players.len()),
            None => 0,
        };

        self.players.insert(index, handle);
        true
    }

    /// Move a handle to the front, then re-apply the sort if there is one.
    ///
    /// Under a sort the handle only wins ties against equal entries.
    /// Returns `false` if the handle is not in the collection.
    pub fn move_to_top(&mut self, handle: &Arc<P>, sort: Option<&PlayerSort<P>>) -> bool {
        let Some(index) = self.position(handle) else {
            return false;
        };

        self.players[..=index].rotate_right(1);

        if let Some(sort) = sort {
            self.resort(sort);
        }
        true
    }

    /// Stable re-sort of every entry
    pub fn resort(&mut self, sort: &PlayerSort<P>) {
        self.players.sort_by(|a, b| sort.compare(a, b));
    }

    /// Unlink the first handle reporting the given player ID
    pub fn remove_by_player_id(&mut self, player_id: &str) -> Option<Arc<P>> {
        let index = self
            .players
            .iter()
            .position(|player| player.player_id() == player_id)?;
        Some(self.players.remove(index))
    }

    /// Take every handle out, leaving the collection empty
    pub fn drain(&mut self) -> Vec<Arc<P>> {
        std::mem::take(&mut self.players)
    }

    /// Managed handles in their current order
    pub fn players(&self) -> &[Arc<P>] {
        &self.players
    }

    /// Number of managed handles
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Whether nothing is managed
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    fn position(&self, handle: &Arc<P>) -> Option<usize> {
        self.players
            .iter()
            .position(|existing| Arc::ptr_eq(existing, handle))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

    use super::*;

    struct FakePlayer {
        id: &'static str,
        priority: u32,
    }

    impl ManagedPlayer for FakePlayer {
        fn player_id(&self) -> &str {
            self.id
        }
    }

    fn player(id: &'static str, priority: u32) -> Arc<FakePlayer> {
        Arc::new(FakePlayer { id, priority })
    }

    fn ids(collection: &PlayerCollection<FakePlayer>) -> Vec<&str> {
        collection.players().iter().map(|p| p.player_id()).collect()
    }

    fn by_priority() -> PlayerSort<FakePlayer> {
        PlayerSort::by(|a: &FakePlayer, b: &FakePlayer| a.priority.cmp(&b.priority))
    }

    #[test]
    fn unsorted_insert_prepends() {
        let mut collection = PlayerCollection::new();
        collection.insert(player("a", 0), None);
        collection.insert(player("b", 0), None);
        collection.insert(player("c", 0), None);

        assert_eq!(ids(&collection), ["c", "b", "a"]);
    }

    #[test]
    fn insert_rejects_same_handle_but_not_equal_values() {
        let mut collection = PlayerCollection::new();
        let a = player("a", 0);

        assert!(collection.insert(Arc::clone(&a), None));
        assert!(!collection.insert(Arc::clone(&a), None));
        assert!(collection.insert(player("a", 0), None));
        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn sorted_insert_lands_before_equal_entries() {
        let sort = by_priority();
        let mut collection = PlayerCollection::new();
        collection.insert(player("one", 1), Some(&sort));
        collection.insert(player("three", 3), Some(&sort));
        collection.insert(player("two", 2), Some(&sort));
        collection.insert(player("other-two", 2), Some(&sort));

        assert_eq!(ids(&collection), ["one", "other-two", "two", "three"]);
    }

    #[test]
    fn move_to_top_keeps_relative_order_of_others() {
        let mut collection = PlayerCollection::new();
        let a = player("a", 0);
        let b = player("b", 0);
        let c = player("c", 0);
        collection.insert(Arc::clone(&c), None);
        collection.insert(Arc::clone(&b), None);
        collection.insert(Arc::clone(&a), None);

        assert!(collection.move_to_top(&c, None));
        assert_eq!(ids(&collection), ["c", "a", "b"]);
    }

    #[test]
    fn move_to_top_under_sort_only_breaks_ties() {
        let sort = by_priority();
        let mut collection = PlayerCollection::new();
        let low = player("low", 1);
        let tie_a = player("tie-a", 5);
        let tie_b = player("tie-b", 5);
        collection.insert(Arc::clone(&low), Some(&sort));
        collection.insert(Arc::clone(&tie_a), Some(&sort));
        collection.insert(Arc::clone(&tie_b), Some(&sort));
        assert_eq!(ids(&collection), ["low", "tie-b", "tie-a"]);

        collection.move_to_top(&tie_a, Some(&sort));
        assert_eq!(ids(&collection), ["low", "tie-a", "tie-b"]);
    }

    #[test]
    fn move_to_top_of_unknown_handle_is_noop() {
        let mut collection = PlayerCollection::new();
        collection.insert(player("a", 0), None);

        assert!(!collection.move_to_top(&player("a", 0), None));
        assert_eq!(ids(&collection), ["a"]);
    }

    #[test]
    fn remove_by_player_id_unlinks_first_match() {
        let mut collection = PlayerCollection::new();
        collection.insert(player("a", 0), None);
        collection.insert(player("b", 0), None);

        let removed = collection.remove_by_player_id("a");
        assert_eq!(removed.map(|p| p.id), Some("a"));
        assert!(collection.remove_by_player_id("missing").is_none());
        assert_eq!(ids(&collection), ["b"]);
    }

    #[test]
    fn dropping_sort_drops_its_context() {
        struct Context(Arc<AtomicUsize>);
        impl Drop for Context {
            fn drop(&mut self) {
                self.0.fetch_add(1, AtomicOrdering::SeqCst);
            }
        }

        let drops = Arc::new(AtomicUsize::new(0));
        let sort = PlayerSort::new(
            Context(Arc::clone(&drops)),
            |a: &FakePlayer, b: &FakePlayer, _ctx: &Context| a.priority.cmp(&b.priority),
        );
        assert_eq!(drops.load(AtomicOrdering::SeqCst), 0);

        drop(sort);
        assert_eq!(drops.load(AtomicOrdering::SeqCst), 1);
    }
}

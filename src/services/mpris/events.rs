use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError,
    atomic::{AtomicU64, Ordering},
};

use super::NameEvent;

type Handler<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Token returned by every subscription, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscribers<T> {
    handlers: Mutex<Vec<(SubscriptionId, Handler<T>)>>,
}

impl<T> Default for Subscribers<T> {
    fn default() -> Self {
        Self {
            handlers: Mutex::new(Vec::new()),
        }
    }
}

impl<T> Subscribers<T> {
    fn lock(&self) -> MutexGuard<'_, Vec<(SubscriptionId, Handler<T>)>> {
        self.handlers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn push(&self, id: SubscriptionId, handler: Handler<T>) {
        self.lock().push((id, handler));
    }

    fn remove(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.lock();
        let before = handlers.len();
        handlers.retain(|(existing, _)| *existing != id);
        handlers.len() != before
    }

    fn emit(&self, value: &T) {
        // Snapshot so handlers can (un)subscribe without deadlocking.
        let snapshot: Vec<Handler<T>> = self
            .lock()
            .iter()
            .map(|(_, handler)| Arc::clone(handler))
            .collect();

        for handler in snapshot {
            handler(value);
        }
    }

    fn len(&self) -> usize {
        self.lock().len()
    }

    fn clear(&self) {
        self.lock().clear();
    }
}

/// Subscriber lists for the four player manager events.
///
/// Delivery is synchronous and follows registration order. A handler that
/// panics unwinds into whoever triggered the emission.
pub struct ManagerEvents<P> {
    next_id: AtomicU64,
    name_appeared: Subscribers<NameEvent>,
    name_vanished: Subscribers<NameEvent>,
    player_appeared: Subscribers<Arc<P>>,
    player_vanished: Subscribers<Arc<P>>,
}

impl<P> Default for ManagerEvents<P> {
    fn default() -> Self {
        Self {
            next_id: AtomicU64::new(0),
            name_appeared: Subscribers::default(),
            name_vanished: Subscribers::default(),
            player_appeared: Subscribers::default(),
            player_vanished: Subscribers::default(),
        }
    }
}

impl<P> ManagerEvents<P> {
    /// Create an emitter with no subscribers
    pub fn new() -> Self {
        Self::default()
    }

    /// Called when a player name gains an owner on the bus
    pub fn on_name_appeared<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&NameEvent) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.name_appeared.push(id, Arc::new(handler));
        id
    }

    /// Called when a tracked player name loses its owner
    pub fn on_name_vanished<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&NameEvent) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.name_vanished.push(id, Arc::new(handler));
        id
    }

    /// Called when a handle enters the managed collection
    pub fn on_player_appeared<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&Arc<P>) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.player_appeared.push(id, Arc::new(handler));
        id
    }

    /// Called when a managed handle is dropped because its name vanished
    pub fn on_player_vanished<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&Arc<P>) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.player_vanished.push(id, Arc::new(handler));
        id
    }

    /// Remove a subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.name_appeared.remove(id)
            || self.name_vanished.remove(id)
            || self.player_appeared.remove(id)
            || self.player_vanished.remove(id)
    }

    /// Total number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.name_appeared.len()
            + self.name_vanished.len()
            + self.player_appeared.len()
            + self.player_vanished.len()
    }

    /// Drop every subscription
    pub fn clear(&self) {
        self.name_appeared.clear();
        self.name_vanished.clear();
        self.player_appeared.clear();
        self.player_vanished.clear();
    }

    pub(crate) fn emit(&self, event: &ManagerEvent<P>) {
        match event {
            ManagerEvent::NameAppeared(name) => self.name_appeared.emit(name),
            ManagerEvent::NameVanished(name) => self.name_vanished.emit(name),
            ManagerEvent::PlayerAppeared(player) => self.player_appeared.emit(player),
            ManagerEvent::PlayerVanished(player) => self.player_vanished.emit(player),
        }
    }

    fn next_id(&self) -> SubscriptionId {
        SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }
}

/// A committed state change waiting to be delivered
pub(crate) enum ManagerEvent<P> {
    NameAppeared(NameEvent),
    NameVanished(NameEvent),
    PlayerAppeared(Arc<P>),
    PlayerVanished(Arc<P>),
}

#[cfg(test)]
mod tests {
    use super::*;

    type BoxedHandler = Box<dyn Fn(&NameEvent) + Send + Sync>;

    fn recorder() -> (Arc<Mutex<Vec<String>>>, impl Fn(&str) -> BoxedHandler) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let log_for_factory = Arc::clone(&log);
        let factory = move |tag: &str| -> BoxedHandler {
            let log = Arc::clone(&log_for_factory);
            let tag = tag.to_string();
            Box::new(move |event: &NameEvent| {
                log.lock().unwrap().push(format!("{tag}:{}", event.name));
            })
        };
        (log, factory)
    }

    #[test]
    fn delivers_in_registration_order() {
        let events: ManagerEvents<()> = ManagerEvents::new();
        let (log, handler) = recorder();
        events.on_name_appeared(handler("first"));
        events.on_name_appeared(handler("second"));

        events.emit(&ManagerEvent::NameAppeared(NameEvent::new("mpv")));

        assert_eq!(*log.lock().unwrap(), ["first:mpv", "second:mpv"]);
    }

    #[test]
    fn kinds_are_independent() {
        let events: ManagerEvents<()> = ManagerEvents::new();
        let (log, handler) = recorder();
        events.on_name_vanished(handler("vanished"));

        events.emit(&ManagerEvent::NameAppeared(NameEvent::new("mpv")));
        assert!(log.lock().unwrap().is_empty());

        events.emit(&ManagerEvent::NameVanished(NameEvent::new("mpv")));
        assert_eq!(*log.lock().unwrap(), ["vanished:mpv"]);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let events: ManagerEvents<()> = ManagerEvents::new();
        let (log, handler) = recorder();
        let id = events.on_name_appeared(handler("gone"));
        events.on_name_appeared(handler("kept"));

        assert!(events.unsubscribe(id));
        assert!(!events.unsubscribe(id));
        events.emit(&ManagerEvent::NameAppeared(NameEvent::new("vlc")));

        assert_eq!(*log.lock().unwrap(), ["kept:vlc"]);
        assert_eq!(events.subscriber_count(), 1);
    }

    #[test]
    fn handler_may_subscribe_during_emission() {
        let events: Arc<ManagerEvents<()>> = Arc::new(ManagerEvents::new());
        let (log, handler) = recorder();
        let inner = Arc::new(handler("late"));

        let events_for_handler = Arc::clone(&events);
        events.on_name_appeared(move |_| {
            let inner = Arc::clone(&inner);
            events_for_handler.on_name_appeared(move |event| inner(event));
        });

        events.emit(&ManagerEvent::NameAppeared(NameEvent::new("a")));
        assert!(log.lock().unwrap().is_empty());

        events.emit(&ManagerEvent::NameAppeared(NameEvent::new("b")));
        assert_eq!(*log.lock().unwrap(), ["late:b"]);
    }
}

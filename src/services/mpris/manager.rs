use std::{
    collections::VecDeque,
    sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError},
    thread::{self, ThreadId},
};

use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use super::{
    ManagedPlayer, MediaError, NameChange, NameEvent, NameOwnerBus, NameOwnerChange,
    NameOwnerChangeStream, NameRegistry, PlayerCollection, PlayerSort,
    events::{ManagerEvent, ManagerEvents},
};

/// Lifecycle of a [`PlayerManager`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagerPhase {
    /// Constructed, bus not touched yet
    Uninitialized,

    /// Listing names and subscribing to ownership changes
    Initializing,

    /// Tracking players
    Ready,

    /// Initialization failed; the manager will never track anything
    Failed,
}

struct ManagerState<P> {
    phase: ManagerPhase,
    init_error: Option<String>,
    names: NameRegistry,
    players: PlayerCollection<P>,
    sort: Option<PlayerSort<P>>,
}

impl<P: ManagedPlayer> ManagerState<P> {
    fn name_owner_changed(&mut self, change: &NameOwnerChange) -> Vec<ManagerEvent<P>> {
        match change.classify() {
            NameChange::Vanished(player_id) => {
                if !self.names.remove(&player_id) {
                    return Vec::new();
                }
                debug!(%player_id, "Player name vanished");

                let mut events = Vec::with_capacity(2);
                if let Some(player) = self.players.remove_by_player_id(&player_id) {
                    events.push(ManagerEvent::PlayerVanished(player));
                }
                events.push(ManagerEvent::NameVanished(NameEvent::new(player_id)));
                events
            }
            NameChange::Appeared(player_id) => {
                if !self.names.insert_front(&player_id) {
                    return Vec::new();
                }
                debug!(%player_id, "Player name appeared");

                vec![ManagerEvent::NameAppeared(NameEvent::new(player_id))]
            }
            NameChange::Irrelevant => Vec::new(),
        }
    }

    fn manage(&mut self, player: Arc<P>, require_name: bool) -> Vec<ManagerEvent<P>> {
        if require_name && !self.names.contains(player.player_id()) {
            debug!(player_id = player.player_id(), "Not managing player without a name");
            return Vec::new();
        }
        if !self.players.insert(Arc::clone(&player), self.sort.as_ref()) {
            return Vec::new();
        }
        debug!(player_id = player.player_id(), "Managing player");

        vec![ManagerEvent::PlayerAppeared(player)]
    }

    fn replace_sort(&mut self, sort: Option<PlayerSort<P>>) -> Option<PlayerSort<P>> {
        let previous = std::mem::replace(&mut self.sort, sort);
        if let Some(sort) = &self.sort {
            self.players.resort(sort);
        }
        previous
    }
}

enum Mutation<P> {
    NameOwnerChanged(NameOwnerChange),
    Manage {
        player: Arc<P>,
        require_name: bool,
    },
    MoveToTop(Arc<P>),
    SetSort(Option<PlayerSort<P>>),
}

struct MutationQueue<P> {
    pending: VecDeque<Mutation<P>>,
    drainer: Option<ThreadId>,
}

/// Releases the queue if a handler unwinds out of a drain.
///
/// Mutations queued by the unwinding drain are discarded with it, and
/// threads waiting for their turn are woken.
struct DrainGuard<'a, P> {
    queue: &'a Mutex<MutationQueue<P>>,
    idle: &'a Condvar,
}

impl<P> Drop for DrainGuard<'_, P> {
    fn drop(&mut self) {
        if thread::panicking() {
            let mut queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
            let discarded = queue.pending.len();
            queue.pending.clear();
            queue.drainer = None;
            drop(queue);

            self.idle.notify_all();
            warn!(discarded, "Event handler panicked, queued mutations discarded");
        }
    }
}

/// Tracks MPRIS player names on the bus and the players chosen for control.
///
/// Names are discovered automatically. Players are not: subscribe to
/// name-appeared, build a handle for the name, and hand it to
/// [`manage`](Self::manage). When a name vanishes, the managed handle
/// reporting that player ID is released.
///
/// Every mutation is applied through a FIFO queue. Events are delivered
/// synchronously once the mutation is committed, in registration order.
/// A mutation requested from inside an event handler is applied after the
/// current emission completes and before the outermost call returns. A
/// call from another thread waits for the running drain to finish, then
/// applies its own mutation before returning.
pub struct PlayerManager<P: ManagedPlayer> {
    bus: Arc<dyn NameOwnerBus>,
    state: Mutex<ManagerState<P>>,
    queue: Mutex<MutationQueue<P>>,
    idle: Condvar,
    events: ManagerEvents<P>,
    listener: Mutex<Option<JoinHandle<()>>>,
}

impl<P: ManagedPlayer> PlayerManager<P> {
    /// Create a manager and initialize it against the bus.
    ///
    /// # Errors
    /// Returns `MediaError::InitializationFailed` if listing names or
    /// subscribing to ownership changes fails
    pub async fn new(bus: Arc<dyn NameOwnerBus>) -> Result<Arc<Self>, MediaError> {
        let manager = Self::with_bus(bus);
        manager.init().await?;
        Ok(manager)
    }

    /// Create a manager without touching the bus. Call [`init`](Self::init) next.
    pub fn with_bus(bus: Arc<dyn NameOwnerBus>) -> Arc<Self> {
        Arc::new(Self {
            bus,
            state: Mutex::new(ManagerState {
                phase: ManagerPhase::Uninitialized,
                init_error: None,
                names: NameRegistry::new(),
                players: PlayerCollection::new(),
                sort: None,
            }),
            queue: Mutex::new(MutationQueue {
                pending: VecDeque::new(),
                drainer: None,
            }),
            idle: Condvar::new(),
            events: ManagerEvents::new(),
            listener: Mutex::new(None),
        })
    }

    /// Seed the name registry and start listening for ownership changes.
    ///
    /// Calling this again once ready is a no-op. A failed initialization is
    /// final: later calls return the same error.
    ///
    /// # Errors
    /// Returns `MediaError::InitializationFailed` if the bus cannot be queried
    /// or subscribed to, or `MediaError::InitializationInProgress` if another
    /// call is still initializing
    #[instrument(skip(self))]
    pub async fn init(self: &Arc<Self>) -> Result<(), MediaError> {
        {
            let mut state = self.lock_state();
            match state.phase {
                ManagerPhase::Ready => return Ok(()),
                ManagerPhase::Failed => {
                    let reason = state.init_error.clone().unwrap_or_default();
                    return Err(MediaError::InitializationFailed(reason));
                }
                ManagerPhase::Initializing => return Err(MediaError::InitializationInProgress),
                ManagerPhase::Uninitialized => state.phase = ManagerPhase::Initializing,
            }
        }

        match self.connect().await {
            Ok((names, changes)) => {
                let count = {
                    let mut state = self.lock_state();
                    state.names.seed(&names);
                    state.phase = ManagerPhase::Ready;
                    state.names.len()
                };
                self.spawn_listener(changes);

                info!(players = count, "Player manager ready");
                Ok(())
            }
            Err(e) => {
                let reason = match e {
                    MediaError::InitializationFailed(reason) => reason,
                    other => other.to_string(),
                };
                warn!("Player manager initialization failed: {reason}");

                let mut state = self.lock_state();
                state.phase = ManagerPhase::Failed;
                state.init_error = Some(reason.clone());
                Err(MediaError::InitializationFailed(reason))
            }
        }
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> ManagerPhase {
        self.lock_state().phase
    }

    /// Event subscriptions
    pub fn events(&self) -> &ManagerEvents<P> {
        &self.events
    }

    /// Player IDs currently on the bus, most recently appeared first
    pub fn player_names(&self) -> Vec<String> {
        self.lock_state().names.names().to_vec()
    }

    /// Managed players in their current order
    pub fn players(&self) -> Vec<Arc<P>> {
        self.lock_state().players.players().to_vec()
    }

    /// Feed one raw ownership change through the name filter.
    ///
    /// The bus listener calls this for every notification. Changes that
    /// arrive before the manager is ready are ignored.
    pub fn handle_name_owner_change(&self, change: NameOwnerChange) {
        self.submit(Mutation::NameOwnerChanged(change));
    }

    /// Start managing a player handle.
    ///
    /// `None` and handles already managed are ignored. Emits player-appeared
    /// once the handle is in the collection.
    pub fn manage(&self, player: impl Into<Option<Arc<P>>>) {
        if let Some(player) = player.into() {
            self.submit(Mutation::Manage {
                player,
                require_name: false,
            });
        }
    }

    /// Like [`manage`](Self::manage), but only if the player's name is
    /// still on the bus when the mutation is applied.
    ///
    /// Use this for handles built asynchronously after name-appeared, so
    /// a vanish that lands in between cannot leave an orphaned handle.
    pub fn manage_if_tracked(&self, player: Arc<P>) {
        self.submit(Mutation::Manage {
            player,
            require_name: true,
        });
    }

    /// Move a managed handle to the front.
    ///
    /// With a sort installed the collection is re-sorted afterwards, so the
    /// handle only wins ties. Unknown handles are ignored.
    pub fn move_to_top(&self, player: &Arc<P>) {
        self.submit(Mutation::MoveToTop(Arc::clone(player)));
    }

    /// Replace the sort order and re-sort the managed players.
    ///
    /// The previous sort, and the context it owns, is dropped. `None`
    /// removes the sort: current order is kept and new players go to the
    /// front.
    pub fn set_sort(&self, sort: Option<PlayerSort<P>>) {
        self.submit(Mutation::SetSort(sort));
    }

    async fn connect(&self) -> Result<(Vec<String>, NameOwnerChangeStream), MediaError> {
        // Subscribe first so nothing that changes during the listing is missed.
        let changes = self.bus.name_owner_changes().await?;
        let names = self.bus.list_names().await?;
        Ok((names, changes))
    }

    fn spawn_listener(self: &Arc<Self>, mut changes: NameOwnerChangeStream) {
        let manager = Arc::downgrade(self);
        let handle = tokio::spawn(async move {
            while let Some(change) = changes.next().await {
                let Some(manager) = manager.upgrade() else {
                    break;
                };
                match change {
                    Ok(change) => manager.handle_name_owner_change(change),
                    Err(e) => warn!("Dropping notification: {e}"),
                }
            }
            debug!("NameOwnerChanged stream closed");
        });

        *self.listener.lock().unwrap_or_else(PoisonError::into_inner) = Some(handle);
    }

    fn submit(&self, mutation: Mutation<P>) {
        let current = thread::current().id();
        {
            let mut queue = self.lock_queue();
            if queue.drainer == Some(current) {
                queue.pending.push_back(mutation);
                return;
            }
            while queue.drainer.is_some() {
                queue = self
                    .idle
                    .wait(queue)
                    .unwrap_or_else(PoisonError::into_inner);
            }
            queue.pending.push_back(mutation);
            queue.drainer = Some(current);
        }

        let _guard = DrainGuard {
            queue: &self.queue,
            idle: &self.idle,
        };
        loop {
            let next = {
                let mut queue = self.lock_queue();
                match queue.pending.pop_front() {
                    Some(mutation) => mutation,
                    None => {
                        queue.drainer = None;
                        drop(queue);
                        self.idle.notify_all();
                        return;
                    }
                }
            };

            for event in self.apply(next) {
                self.events.emit(&event);
            }
        }
    }

    fn apply(&self, mutation: Mutation<P>) -> Vec<ManagerEvent<P>> {
        let mut state = self.lock_state();
        match mutation {
            Mutation::NameOwnerChanged(change) => {
                if state.phase != ManagerPhase::Ready {
                    debug!(name = %change.name, "Ignoring ownership change before ready");
                    return Vec::new();
                }
                state.name_owner_changed(&change)
            }
            Mutation::Manage {
                player,
                require_name,
            } => state.manage(player, require_name),
            Mutation::MoveToTop(player) => {
                let state = &mut *state;
                state.players.move_to_top(&player, state.sort.as_ref());
                Vec::new()
            }
            Mutation::SetSort(sort) => {
                let previous = state.replace_sort(sort);
                drop(state);
                drop(previous);
                Vec::new()
            }
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, ManagerState<P>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_queue(&self) -> MutexGuard<'_, MutationQueue<P>> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<P: ManagedPlayer> Drop for PlayerManager<P> {
    fn drop(&mut self) {
        let listener = self
            .listener
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(listener) = listener {
            listener.abort();
        }

        self.events.clear();

        let state = self.state.get_mut().unwrap_or_else(PoisonError::into_inner);
        let released = state.players.drain().len();
        debug!(released, "Player manager dropped");
    }
}

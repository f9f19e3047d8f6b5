mod control;
mod list;
mod status;
mod watch;

use std::sync::{Arc, Weak};

use tracing::{debug, warn};
use zbus::Connection;

use crate::{
    config::{MediaConfig, SortOrder},
    services::mpris::{
        DbusNameOwnerBus, ManagedPlayer, MprisPlayer, NameEvent, PlayerManager, PlayerSort,
    },
};

use super::CliError;

pub(crate) use control::{Transport, execute as control};
pub(crate) use list::execute as list;
pub(crate) use status::execute as status;
pub(crate) use watch::execute as watch;

/// Bus connection plus an initialized player manager
pub(crate) struct PlayerSession {
    connection: Connection,
    manager: Arc<PlayerManager<MprisPlayer>>,
    media: MediaConfig,
}

impl PlayerSession {
    /// Connect to the configured bus and start tracking players
    pub(crate) async fn open(media: MediaConfig) -> Result<Self, CliError> {
        let bus = DbusNameOwnerBus::connect(media.bus).await?;
        let connection = bus.connection().clone();
        let manager = PlayerManager::new(Arc::new(bus)).await?;

        if media.sort == SortOrder::Name {
            manager.set_sort(Some(PlayerSort::by(|a: &MprisPlayer, b: &MprisPlayer| {
                a.player_id().cmp(b.player_id())
            })));
        }

        Ok(Self {
            connection,
            manager,
            media,
        })
    }

    pub(crate) fn manager(&self) -> &Arc<PlayerManager<MprisPlayer>> {
        &self.manager
    }

    /// Manage every player already on the bus, keeping discovery order
    pub(crate) async fn manage_known_players(&self) {
        let promoter = self.promoter();
        for player_id in self.manager.player_names().iter().rev() {
            promoter.manage(player_id).await;
        }
    }

    /// Name-appeared handler that builds and manages a player for each new name
    pub(crate) fn manage_on_appear(&self) -> impl Fn(&NameEvent) + Send + Sync + 'static {
        let promoter = self.promoter();
        move |event| {
            let promoter = promoter.clone();
            let player_id = event.name.clone();
            tokio::spawn(async move { promoter.manage(&player_id).await });
        }
    }

    fn promoter(&self) -> Promoter {
        Promoter {
            connection: self.connection.clone(),
            manager: Arc::downgrade(&self.manager),
            media: self.media.clone(),
        }
    }
}

#[derive(Clone)]
struct Promoter {
    connection: Connection,
    manager: Weak<PlayerManager<MprisPlayer>>,
    media: MediaConfig,
}

impl Promoter {
    async fn manage(&self, player_id: &str) {
        if self.media.is_ignored(player_id) {
            debug!(player_id, "Ignoring player based on configuration");
            return;
        }

        let player = match MprisPlayer::connect(&self.connection, player_id).await {
            Ok(player) => player,
            Err(e) => {
                warn!(player_id, "Failed to connect to player: {e}");
                return;
            }
        };

        let Some(manager) = self.manager.upgrade() else {
            return;
        };
        // The name may have vanished while the proxies were being built.
        manager.manage_if_tracked(player);
    }
}

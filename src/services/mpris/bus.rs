use std::pin::Pin;

use async_trait::async_trait;
use futures::{Stream, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use zbus::{Connection, fdo, names::UniqueName};

use super::{MediaError, NameOwnerChange};

/// Stream of raw ownership changes. An `Err` item is a malformed notification.
pub type NameOwnerChangeStream =
    Pin<Box<dyn Stream<Item = Result<NameOwnerChange, MediaError>> + Send>>;

/// Message bus operations the player manager depends on
#[async_trait]
pub trait NameOwnerBus: Send + Sync {
    /// Every name currently owned on the bus
    ///
    /// # Errors
    /// Returns error if the bus cannot be queried
    async fn list_names(&self) -> Result<Vec<String>, MediaError>;

    /// Subscribe to `NameOwnerChanged` notifications
    ///
    /// # Errors
    /// Returns error if the signal subscription fails
    async fn name_owner_changes(&self) -> Result<NameOwnerChangeStream, MediaError>;
}

/// Which D-Bus instance to watch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusKind {
    /// Per-login-session bus, where desktop players live
    #[default]
    Session,

    /// System-wide bus
    System,
}

/// [`NameOwnerBus`] backed by the `org.freedesktop.DBus` daemon interface
#[derive(Debug, Clone)]
pub struct DbusNameOwnerBus {
    connection: Connection,
}

impl DbusNameOwnerBus {
    /// Open a connection to the given bus
    ///
    /// # Errors
    /// Returns `MediaError::InitializationFailed` if the connection cannot be established
    #[instrument]
    pub async fn connect(kind: BusKind) -> Result<Self, MediaError> {
        let connection = match kind {
            BusKind::Session => Connection::session().await,
            BusKind::System => Connection::system().await,
        }
        .map_err(|e| MediaError::InitializationFailed(format!("D-Bus connection failed: {e}")))?;

        info!("Connected to {kind:?} bus");
        Ok(Self { connection })
    }

    /// Wrap an existing connection
    pub fn from_connection(connection: Connection) -> Self {
        Self { connection }
    }

    /// Underlying connection, for building player proxies
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    async fn dbus_proxy(&self) -> Result<fdo::DBusProxy<'static>, MediaError> {
        fdo::DBusProxy::new(&self.connection)
            .await
            .map_err(|e| MediaError::InitializationFailed(format!("DBus proxy failed: {e}")))
    }
}

#[async_trait]
impl NameOwnerBus for DbusNameOwnerBus {
    async fn list_names(&self) -> Result<Vec<String>, MediaError> {
        let names = self
            .dbus_proxy()
            .await?
            .list_names()
            .await
            .map_err(|e| MediaError::DbusError(e.into()))?;

        Ok(names.iter().map(|name| name.as_str().to_string()).collect())
    }

    async fn name_owner_changes(&self) -> Result<NameOwnerChangeStream, MediaError> {
        let signals = self
            .dbus_proxy()
            .await?
            .receive_name_owner_changed()
            .await
            .map_err(|e| {
                MediaError::InitializationFailed(format!("Signal subscription failed: {e}"))
            })?;

        let changes = signals.map(|signal| {
            let args = signal
                .args()
                .map_err(|e| MediaError::MalformedNotification(e.to_string()))?;

            Ok(NameOwnerChange::new(
                args.name().as_str(),
                owner_string(args.old_owner()),
                owner_string(args.new_owner()),
            ))
        });

        Ok(Box::pin(changes))
    }
}

fn owner_string(owner: &Option<UniqueName<'_>>) -> String {
    owner
        .as_ref()
        .map(|owner| owner.as_str().to_string())
        .unwrap_or_default()
}

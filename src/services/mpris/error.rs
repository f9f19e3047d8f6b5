/// Errors that can occur while tracking MPRIS players
#[derive(thiserror::Error, Debug)]
pub enum MediaError {
    /// Player with the given ID is not on the bus
    #[error("Player {0:?} not found")]
    PlayerNotFound(String),

    /// D-Bus communication error
    #[error("D-Bus operation failed: {0}")]
    DbusError(#[from] zbus::Error),

    /// Connecting to the bus or listing its names failed
    #[error("Failed to initialize player manager: {0}")]
    InitializationFailed(String),

    /// Another caller is initializing the manager right now
    #[error("Player manager initialization already in progress")]
    InitializationInProgress,

    /// A NameOwnerChanged notification did not carry the expected `(sss)` body
    #[error("Malformed NameOwnerChanged notification: {0}")]
    MalformedNotification(String),
}

use thiserror::Error;

use crate::{MediactlError, services::MediaError};

/// Errors that can occur during CLI command execution.
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid arguments were provided to a command.
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// Name of the offending argument
        arg: String,
        /// Why it was rejected
        reason: String,
    },

    /// The configuration could not be loaded.
    #[error("Configuration error: {0}")]
    ConfigError(#[from] MediactlError),

    /// The player service failed.
    ///
    /// Wraps bus connection and initialization failures as well as
    /// errors talking to an individual player.
    #[error("{service} service error: {details}")]
    ServiceError {
        /// Service that failed
        service: String,
        /// Failure details
        details: String,
    },

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<MediaError> for CliError {
    fn from(error: MediaError) -> Self {
        CliError::ServiceError {
            service: "Media".to_string(),
            details: error.to_string(),
        }
    }
}

/// Type alias for command execution results.
///
/// Commands return the text to print on success.
pub type CommandResult = Result<String, CliError>;

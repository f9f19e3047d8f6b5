//! Configuration schema definitions and loading.
//!
//! All configurations are serializable to/from TOML format and every
//! field has a default, so an empty or missing file is valid.

mod general;
mod loading;
mod media;
mod paths;

#[cfg(test)]
mod tests;

pub use general::{GeneralConfig, LogLevel};
pub use media::{MediaConfig, SortOrder};
pub use paths::ConfigPaths;

use serde::{Deserialize, Serialize};

/// Main configuration structure for mediactl.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// General application settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Player tracking settings.
    #[serde(default)]
    pub media: MediaConfig,
}

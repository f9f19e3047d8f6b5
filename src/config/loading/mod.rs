use std::{fs, io::ErrorKind, path::Path};

use tracing::{debug, instrument};

use super::Config;
use crate::{MediactlError, Result};

impl Config {
    /// Loads the configuration file at `path`.
    ///
    /// A missing file yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file exists but cannot be read
    /// - The TOML content is invalid
    /// - The configuration fails validation
    #[instrument]
    pub fn load(path: &Path) -> Result<Config> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No config file, using defaults");
                return Ok(Config::default());
            }
            Err(e) => {
                return Err(MediactlError::IoError {
                    path: path.to_path_buf(),
                    details: e.to_string(),
                });
            }
        };

        let config: Config =
            toml::from_str(&content).map_err(|e| MediactlError::toml_parse(e, Some(path)))?;
        config.validate()?;
        Ok(config)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or fails validation
    pub fn from_toml(content: &str) -> Result<Config> {
        let config: Config =
            toml::from_str(content).map_err(|e| MediactlError::toml_parse(e, None))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values serde cannot reject on its own.
    ///
    /// # Errors
    ///
    /// Returns `MediactlError::ConfigValidation` for an empty ignore pattern,
    /// which would match every player
    pub fn validate(&self) -> Result<()> {
        if self
            .media
            .ignored_players
            .iter()
            .any(|pattern| pattern.is_empty())
        {
            return Err(MediactlError::ConfigValidation {
                component: "media.ignored_players".to_string(),
                details: "empty pattern would ignore every player".to_string(),
            });
        }
        Ok(())
    }
}

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// `<config_dir>/memegen/config.toml`, or `./memegen/config.toml` when the
    /// platform has no config directory.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("memegen")
            .join("config.toml")
    }

    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Reads and validates `path`. A missing file is not an error: every
    /// setting has a default.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file; using defaults");
                return Ok(Config::default());
            }
            Err(source) => {
                return Err(ConfigError::ReadError {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::ParseError {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings the app cannot run with: a non-http(s) endpoint,
    /// zero-sized exports and a zero tick.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = reqwest::Url::parse(&self.source.endpoint).map_err(|e| {
            ConfigError::ValidationError {
                message: format!("Invalid endpoint '{}': {}", self.source.endpoint, e),
            }
        })?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "Endpoint '{}' must use http or https",
                    self.source.endpoint
                ),
            });
        }

        if self.export.width == 0 {
            return Err(ConfigError::ValidationError {
                message: "Export width must be greater than zero".to_string(),
            });
        }

        if !(self.export.caption_px > 0.0) {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "Caption size must be positive, got {}",
                    self.export.caption_px
                ),
            });
        }

        if self.ui.tick_rate_ms == 0 {
            return Err(ConfigError::ValidationError {
                message: "Tick rate must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}

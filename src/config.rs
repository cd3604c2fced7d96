//! Runtime configuration loaded from TOML.

use crate::error::ConfigError;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Settings shared by every match in a directory.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Bounded mailbox size per match worker.
    #[serde(default = "default_mailbox_capacity")]
    mailbox_capacity: usize,

    /// Tracing filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    log_filter: String,
}

fn default_mailbox_capacity() -> usize {
    32
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            mailbox_capacity: default_mailbox_capacity(),
            log_filter: default_log_filter(),
        }
    }
}

impl MatchConfig {
    /// Creates a configuration with the given mailbox size.
    ///
    /// # Errors
    ///
    /// Rejects a capacity of zero.
    #[instrument]
    pub fn with_mailbox_capacity(mailbox_capacity: usize) -> Result<Self, ConfigError> {
        Self {
            mailbox_capacity,
            ..Self::default()
        }
        .validated()
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on malformed TOML or a zero mailbox capacity.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validated()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(mailbox_capacity = config.mailbox_capacity, "Config loaded successfully");
        Ok(config)
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if self.mailbox_capacity == 0 {
            return Err(ConfigError::new("mailbox_capacity must be at least 1"));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_toml() {
        let config = MatchConfig::from_toml("").unwrap();
        assert_eq!(config, MatchConfig::default());
        assert_eq!(*config.mailbox_capacity(), 32);
        assert_eq!(config.log_filter(), "info");
    }

    #[test]
    fn test_overrides() {
        let config =
            MatchConfig::from_toml("mailbox_capacity = 4\nlog_filter = \"debug\"").unwrap();
        assert_eq!(*config.mailbox_capacity(), 4);
        assert_eq!(config.log_filter(), "debug");
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(MatchConfig::from_toml("mailbox_capacity = 0").is_err());
        assert!(MatchConfig::with_mailbox_capacity(0).is_err());
    }

    #[test]
    fn test_malformed_toml() {
        let err = MatchConfig::from_toml("mailbox_capacity = \"lots\"").unwrap_err();
        assert!(err.message.contains("Failed to parse config"));
    }
}

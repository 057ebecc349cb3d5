//! Capacity configuration for the event index.
//!
//! The event layer is configured from the `events` section of the
//! simulation's YAML configuration. Every field is optional; missing
//! values fall back to the defaults below.
//!
//! ```yaml
//! events:
//!   capacity_events: 8
//!   capacity_singletons: 8
//!   destroy_actions_capacity: 16
//! ```

use std::path::Path;

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Pre-allocation sizes for the event index and destroy events systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct EventsConfig {
    /// Expected number of distinct replicant event types (query cache
    /// capacity).
    #[serde(default = "default_capacity_events")]
    pub capacity_events: usize,

    /// Expected number of distinct singleton event types (singleton index
    /// capacity).
    #[serde(default = "default_capacity_singletons")]
    pub capacity_singletons: usize,

    /// Expected number of registered destroy actions per system.
    #[serde(default = "default_destroy_actions_capacity")]
    pub destroy_actions_capacity: usize,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            capacity_events: default_capacity_events(),
            capacity_singletons: default_capacity_singletons(),
            destroy_actions_capacity: default_destroy_actions_capacity(),
        }
    }
}

impl EventsConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// An empty document yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }
}

const fn default_capacity_events() -> usize {
    8
}

const fn default_capacity_singletons() -> usize {
    8
}

const fn default_destroy_actions_capacity() -> usize {
    16
}

//! Configuration for the tick driver.
//!
//! Loaded from `tickbus-config.yaml` in the working directory, or from the
//! path named by `TICKBUS_CONFIG`. A missing file means defaults. Every
//! section and field is optional.
//!
//! ```yaml
//! events:
//!   capacity_events: 8
//!   capacity_singletons: 8
//!   destroy_actions_capacity: 16
//! ticks:
//!   max_ticks: 50
//!   tick_interval_ms: 100
//!   seed: 42
//! arena:
//!   fighters: 6
//!   max_health: 100
//!   max_hit: 20
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tickbus_events::{ConfigError, EventsConfig};
use tracing::info;

/// Environment variable overriding the configuration file path.
pub const CONFIG_ENV: &str = "TICKBUS_CONFIG";

/// Configuration file looked up in the working directory by default.
pub const DEFAULT_CONFIG_PATH: &str = "tickbus-config.yaml";

/// Root configuration for the tick driver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    /// Event index and destroy system capacities.
    #[serde(default)]
    pub events: EventsConfig,

    /// Tick loop bounds and pacing.
    #[serde(default)]
    pub ticks: TickConfig,

    /// Combat arena setup.
    #[serde(default)]
    pub arena: ArenaConfig,
}

/// Tick loop bounds and pacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TickConfig {
    /// Stop after this many ticks. Zero means run until one fighter is
    /// left standing.
    #[serde(default = "default_max_ticks")]
    pub max_ticks: u64,

    /// Pause between ticks, in milliseconds. Zero runs ticks back to back.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Seed for the attack roll generator.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            max_ticks: default_max_ticks(),
            tick_interval_ms: default_tick_interval_ms(),
            seed: default_seed(),
        }
    }
}

/// Combat arena setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ArenaConfig {
    /// Number of fighters entering the arena.
    #[serde(default = "default_fighters")]
    pub fighters: usize,

    /// Starting health of every fighter.
    #[serde(default = "default_max_health")]
    pub max_health: u32,

    /// Upper bound of a single hit. Hits roll in `1..=max_hit`.
    #[serde(default = "default_max_hit")]
    pub max_hit: u32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            fighters: default_fighters(),
            max_health: default_max_health(),
            max_hit: default_max_hit(),
        }
    }
}

impl EngineConfig {
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

    /// Parse configuration from a YAML string. An empty document yields
    /// the defaults.
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

/// Resolve the configuration path, honoring [`CONFIG_ENV`].
pub fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV).map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from)
}

/// Load the configuration from `path`, falling back to defaults when the
/// file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file exists but cannot be read or
/// parsed.
pub fn load_from(path: &Path) -> Result<EngineConfig, ConfigError> {
    if path.exists() {
        EngineConfig::from_file(path)
    } else {
        info!(path = %path.display(), "Config file not found, using defaults");
        Ok(EngineConfig::default())
    }
}

const fn default_max_ticks() -> u64 {
    50
}

const fn default_tick_interval_ms() -> u64 {
    100
}

const fn default_seed() -> u64 {
    42
}

const fn default_fighters() -> usize {
    6
}

const fn default_max_health() -> u32 {
    100
}

const fn default_max_hit() -> u32 {
    20
}

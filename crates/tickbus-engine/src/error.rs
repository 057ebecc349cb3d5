//! Error types for the tick driver binary.
//!
//! [`EngineError`] is the top-level error type that wraps all possible
//! failure modes during startup and the tick loop.

use tickbus_events::{ConfigError, EventError};

/// Top-level error for the tick driver binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// An event operation failed inside a tick system.
    #[error("event error: {source}")]
    Events {
        /// The underlying event error.
        #[from]
        source: EventError,
    },

    /// A tick system failed for a reason of its own.
    #[error("system `{system}` failed at tick {tick}: {message}")]
    System {
        /// Name of the failing system.
        system: &'static str,
        /// Tick being executed.
        tick: u64,
        /// Description of the failure.
        message: String,
    },
}

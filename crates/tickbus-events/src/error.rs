//! Error types for the `tickbus-events` crate.

use tickbus_store::StoreError;

/// Errors surfaced by the event index and the destroy events system.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EventError {
    /// A singleton event was accessed by reference while none is live.
    ///
    /// This is a programming error in the caller: check with
    /// `has_singleton` or use `try_get_singleton` when absence is expected.
    #[error("no live singleton event of type {event}")]
    NotFound {
        /// Type name of the requested event.
        event: &'static str,
    },

    /// The underlying record store rejected an operation.
    #[error("store error: {source}")]
    Store {
        /// The underlying store error.
        #[from]
        source: StoreError,
    },
}

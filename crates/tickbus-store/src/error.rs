//! Error types for the `tickbus-store` crate.
//!
//! All fallible store operations return [`StoreError`]. Callers layered on
//! top of the store (the event index) propagate these unchanged.

use crate::record::RecordId;

/// Errors that can occur during record store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The record was already released, or the identifier belongs to an
    /// older generation of a recycled slot.
    #[error("record {0} is not live")]
    StaleRecord(RecordId),

    /// A payload of this type is already attached to the record.
    #[error("record {record} already carries a {payload} payload")]
    AlreadyAttached {
        /// The record the attach was attempted on.
        record: RecordId,
        /// Type name of the payload.
        payload: &'static str,
    },

    /// No payload of this type is attached to the record.
    #[error("record {record} carries no {payload} payload")]
    PayloadMissing {
        /// The record that was read.
        record: RecordId,
        /// Type name of the requested payload.
        payload: &'static str,
    },

    /// The pool registered for a type tag holds a different payload type.
    #[error("payload pool for {payload} has a mismatched element type")]
    PoolTypeMismatch {
        /// Type name of the requested payload.
        payload: &'static str,
    },

    /// Every record slot index is in use.
    #[error("record capacity exhausted ({0} slots)")]
    CapacityExhausted(usize),

    /// An internal error that should not occur in normal operation.
    #[error("internal store error: {0}")]
    Internal(&'static str),
}

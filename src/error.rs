//! Errors returned by table operations

use std::collections::TryReserveError;

/// Failure of a table operation.
///
/// Only resource exhaustion and the null-pointer contract are errors; a missing
/// key is an ordinary `None`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Allocating the slot array or a key copy failed
    #[error("out of memory: {0}")]
    OutOfMemory(#[from] TryReserveError),

    /// Growing past `capacity` slots would overflow `usize`
    #[error("capacity overflow: cannot grow a table of {capacity} slots")]
    CapacityOverflow {
        /// Slot count at the time growth was attempted
        capacity: usize,
    },

    /// A null pointer was passed where a value is required
    #[error("null value rejected")]
    NullValue,
}

/// Result alias for table operations
pub type Result<T> = std::result::Result<T, Error>;

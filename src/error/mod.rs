//! Error types for shardbuf.

use thiserror::Error;

/// Errors reported by pool construction and checked allocation.
///
/// Running out of shard capacity is never an error: such requests fall
/// back to a standalone allocation instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// Invalid configuration parameter.
    #[error("invalid config: {message}")]
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },

    /// A negative size was passed to [`Pool::try_make`](crate::Pool::try_make).
    #[error("invalid buffer size: {requested} is negative")]
    NegativeSize {
        /// The size that was requested.
        requested: i64,
    },

    /// The requested size does not fit in `usize` on this target.
    #[error("invalid buffer size: {requested} does not fit in usize")]
    SizeOverflow {
        /// The size that was requested.
        requested: i64,
    },
}

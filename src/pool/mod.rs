//! The shard pool.
//!
//! - [`Pool`] - Turns size requests into [`Buffer`](crate::Buffer)s
//! - [`PoolStats`] - Counter snapshot for tuning

mod engine;
mod stats;

pub use engine::Pool;
pub use stats::PoolStats;

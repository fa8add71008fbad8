//! Pool counters.

use std::sync::atomic::{AtomicU64, Ordering};

/// Snapshot of a pool's activity counters.
///
/// Counters only ever grow. They are advisory: concurrent allocations may
/// be half-reflected in a snapshot.
///
/// # Example
///
/// ```
/// use shardbuf::Pool;
///
/// let pool = Pool::with_shard_size(100)?;
/// pool.make(20).done();
/// pool.make(500).done();
///
/// let stats = pool.stats();
/// assert_eq!(stats.shards_created, 1);
/// assert_eq!(stats.pooled_allocations, 1);
/// assert_eq!(stats.standalone_allocations, 1);
/// # Ok::<(), shardbuf::PoolError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PoolStats {
    /// Shards allocated so far.
    pub shards_created: u64,

    /// Times a fully released shard restarted at offset zero.
    pub shard_resets: u64,

    /// Buffers carved from a shard.
    pub pooled_allocations: u64,

    /// Buffers served by a standalone allocation.
    pub standalone_allocations: u64,

    /// Shards dropped because the idle queue was full.
    pub shards_discarded: u64,
}

#[derive(Debug, Default)]
pub(crate) struct PoolCounters {
    shards_created: AtomicU64,
    shard_resets: AtomicU64,
    pooled_allocations: AtomicU64,
    standalone_allocations: AtomicU64,
    shards_discarded: AtomicU64,
}

impl PoolCounters {
    pub(crate) fn shard_created(&self) {
        self.shards_created.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn shard_reset(&self) {
        self.shard_resets.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn pooled(&self) {
        self.pooled_allocations.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn standalone(&self) {
        self.standalone_allocations.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn shard_discarded(&self) {
        self.shards_discarded.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> PoolStats {
        PoolStats {
            shards_created: self.shards_created.load(Ordering::Relaxed),
            shard_resets: self.shard_resets.load(Ordering::Relaxed),
            pooled_allocations: self.pooled_allocations.load(Ordering::Relaxed),
            standalone_allocations: self.standalone_allocations.load(Ordering::Relaxed),
            shards_discarded: self.shards_discarded.load(Ordering::Relaxed),
        }
    }
}

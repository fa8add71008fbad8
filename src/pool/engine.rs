//! Pool engine - shard acquisition, retry and fallback.
//!
//! A request for `n` bytes is served in one of two ways:
//!
//! - `n == 0` or `n >= shard_size`: a standalone allocation of exactly `n`
//!   bytes. Such requests could never (or should never) occupy a shard.
//! - otherwise: up to `max_retries` idle shards are checked out of the
//!   queue and asked for `n` bytes. The first one that has room (or has been
//!   fully released) serves the request. If none does, a new shard is
//!   created. Every checked-out shard goes back to the queue only after the
//!   whole attempt sequence, so one request never inspects the same shard
//!   twice.
//!
//! # Example
//!
//! ```
//! use shardbuf::{Pool, PoolConfig};
//!
//! let pool = Pool::new(PoolConfig::new(4096)?.with_max_retries(2))?;
//!
//! let mut buf = pool.make(64);
//! buf.clear();
//! buf[..5].copy_from_slice(b"hello");
//! buf.done();
//! # Ok::<(), shardbuf::PoolError>(())
//! ```

use std::fmt;

use crossbeam_queue::ArrayQueue;
use tracing::{debug, trace};

use super::stats::{PoolCounters, PoolStats};
use crate::buffer::Buffer;
use crate::config::PoolConfig;
use crate::error::PoolError;
use crate::shard::{Claimed, Shard};

/// A concurrent pool of reusable shards handing out exact-size buffers.
///
/// `Pool` is `Send + Sync`; share it behind an `Arc` (or a reference with
/// scoped threads) and call [`Pool::make`] from any thread. No call ever
/// blocks: the idle-shard queue is lock-free, and a shard is only touched
/// by the thread that checked it out.
///
/// # Memory
///
/// Idle memory is bounded by `max_pooled_shards * shard_size`. A buffer
/// that is never released pins the rest of its shard until the buffer is
/// dropped; it never affects other shards.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use std::thread;
///
/// use shardbuf::Pool;
///
/// let pool = Arc::new(Pool::with_shard_size(1024)?);
///
/// let handles: Vec<_> = (0..4)
///     .map(|_| {
///         let pool = Arc::clone(&pool);
///         thread::spawn(move || {
///             let mut buf = pool.make(16);
///             buf[0] = 1;
///             buf.done();
///         })
///     })
///     .collect();
///
/// for handle in handles {
///     handle.join().unwrap();
/// }
/// # Ok::<(), shardbuf::PoolError>(())
/// ```
pub struct Pool {
    config: PoolConfig,
    shards: ArrayQueue<Shard>,
    counters: PoolCounters,
}

impl Pool {
    /// Creates a pool from a configuration.
    ///
    /// Shards are created lazily; a new pool holds no memory.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidConfig`] if the configuration does not
    /// validate.
    pub fn new(config: PoolConfig) -> Result<Self, PoolError> {
        config.validate()?;
        Ok(Self::new_unchecked(config))
    }

    /// Creates a pool with the given shard size and default limits.
    pub fn with_shard_size(shard_size: usize) -> Result<Self, PoolError> {
        Self::new(PoolConfig::new(shard_size)?)
    }

    fn new_unchecked(config: PoolConfig) -> Self {
        Self {
            shards: ArrayQueue::new(config.max_pooled_shards()),
            config,
            counters: PoolCounters::default(),
        }
    }

    /// Returns the pool configuration.
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Returns the shard size.
    pub fn shard_size(&self) -> usize {
        self.config.shard_size()
    }

    /// Returns the number of shards currently waiting in the idle queue.
    pub fn idle_shards(&self) -> usize {
        self.shards.len()
    }

    /// Returns a snapshot of the pool counters.
    pub fn stats(&self) -> PoolStats {
        self.counters.snapshot()
    }

    /// Returns a buffer of exactly `n` bytes.
    ///
    /// Never fails. The contents are unspecified; call
    /// [`Buffer::clear`] if they need to be zero.
    pub fn make(&self, n: usize) -> Buffer {
        if n == 0 || n >= self.config.shard_size() {
            self.counters.standalone();
            return Buffer::standalone(n);
        }

        let mut exhausted = Vec::new();
        let mut found = None;

        for _ in 0..self.config.attempts() {
            let Some(mut shard) = self.shards.pop() else {
                break;
            };
            match shard.try_claim(n) {
                Some(claimed) => {
                    found = Some((shard, claimed));
                    break;
                }
                None => exhausted.push(shard),
            }
        }

        let (shard, claimed) = match found {
            Some(found) => found,
            None => self.create_shard(n),
        };

        for spent in exhausted {
            self.recycle(spent);
        }
        self.recycle(shard);

        if claimed.reset {
            self.counters.shard_reset();
        }
        self.counters.pooled();
        claimed.buffer
    }

    /// Like [`Pool::make`], but takes a signed size.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::NegativeSize`] if `n < 0`, or
    /// [`PoolError::SizeOverflow`] if `n` does not fit in `usize`.
    ///
    /// # Example
    ///
    /// ```
    /// use shardbuf::{Pool, PoolError};
    ///
    /// let pool = Pool::default();
    /// assert_eq!(pool.try_make(8)?.len(), 8);
    /// assert_eq!(
    ///     pool.try_make(-1).unwrap_err(),
    ///     PoolError::NegativeSize { requested: -1 }
    /// );
    /// # Ok::<(), PoolError>(())
    /// ```
    pub fn try_make(&self, n: i64) -> Result<Buffer, PoolError> {
        if n < 0 {
            return Err(PoolError::NegativeSize { requested: n });
        }
        let n = usize::try_from(n).map_err(|_| PoolError::SizeOverflow { requested: n })?;
        Ok(self.make(n))
    }

    fn create_shard(&self, n: usize) -> (Shard, Claimed) {
        let mut shard = Shard::new(self.config.shard_size());
        self.counters.shard_created();
        trace!(
            shard_size = shard.capacity(),
            idle = self.shards.len(),
            "created shard"
        );

        // offset 0 and n < shard_size: always fits
        let buffer = shard.claim(n);
        (
            shard,
            Claimed {
                buffer,
                reset: false,
            },
        )
    }

    fn recycle(&self, shard: Shard) {
        if let Err(shard) = self.shards.push(shard) {
            self.counters.shard_discarded();
            debug!(
                offset = shard.offset(),
                live = shard.live(),
                max_pooled_shards = self.config.max_pooled_shards(),
                "idle queue full, discarding shard"
            );
        }
    }
}

impl Default for Pool {
    fn default() -> Self {
        Self::new_unchecked(PoolConfig::default())
    }
}

impl fmt::Debug for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("config", &self.config)
            .field("idle_shards", &self.shards.len())
            .finish()
    }
}

//! Fixed-capacity shards with bump-pointer sub-allocation.
//!
//! A shard owns one `shard_size` allocation and hands out consecutive,
//! non-overlapping views of it. Each view bumps the shard's live counter;
//! releasing the view decrements it. The shard never resets eagerly: only
//! when it is selected again and its counter is zero does it start over
//! from offset zero.
//!
//! Views are split off the backing [`BytesMut`], so each view is uniquely
//! owned and keeps the allocation alive on its own. Once every view has
//! been dropped the shard is the sole owner again and can reclaim the whole
//! allocation without touching the allocator.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use bytes::BytesMut;
use tracing::{debug, trace};

use crate::buffer::Buffer;

/// Result of a successful [`Shard::try_claim`].
pub(crate) struct Claimed {
    /// The claimed view.
    pub(crate) buffer: Buffer,

    /// Whether the shard was reset to offset zero to serve the claim.
    pub(crate) reset: bool,
}

/// A fixed-capacity backing region plus bump offset and live counter.
///
/// Only one thread manipulates a shard at a time (the pool moves it out of
/// the idle queue while inspecting it). The live counter is shared with
/// every outstanding [`Buffer`] and is updated atomically.
pub(crate) struct Shard {
    /// Unclaimed tail of the allocation, `[offset, capacity)`.
    storage: BytesMut,

    capacity: usize,

    /// Outstanding buffers carved from this shard.
    live: Arc<AtomicUsize>,
}

impl Shard {
    /// Allocates a new shard of `capacity` bytes.
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            storage: BytesMut::zeroed(capacity),
            capacity,
            live: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Returns the shard capacity in bytes.
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the next free byte index.
    pub(crate) fn offset(&self) -> usize {
        self.capacity - self.storage.len()
    }

    /// Returns the number of outstanding buffers.
    pub(crate) fn live(&self) -> usize {
        self.live.load(Ordering::Acquire)
    }

    /// Tries to claim `n` bytes.
    ///
    /// Succeeds if `offset + n < capacity`, or if every earlier view has
    /// been released, in which case the shard restarts at offset zero.
    /// Returns `None` without side effects otherwise.
    pub(crate) fn try_claim(&mut self, n: usize) -> Option<Claimed> {
        let mut reset = false;

        // Strict: a claim never consumes the last byte of the tail.
        if n >= self.storage.len() {
            if n >= self.capacity || self.live() != 0 {
                return None;
            }
            self.reset();
            reset = true;
        }

        Some(Claimed {
            buffer: self.claim(n),
            reset,
        })
    }

    /// Claims `n` bytes from the current offset.
    ///
    /// `n` must not exceed the unclaimed tail.
    pub(crate) fn claim(&mut self, n: usize) -> Buffer {
        self.live.fetch_add(1, Ordering::AcqRel);
        let view = self.storage.split_to(n);
        Buffer::pooled(view, Arc::downgrade(&self.live))
    }

    /// Moves the offset back to zero.
    ///
    /// Only valid when the live counter is zero, i.e. no view into the
    /// allocation is left.
    fn reset(&mut self) {
        self.storage.clear();

        if self.storage.try_reclaim(self.capacity) {
            self.storage.resize(self.capacity, 0);
            trace!(capacity = self.capacity, "shard reset to offset 0");
        } else {
            debug!(
                capacity = self.capacity,
                "shard storage still referenced, allocating fresh storage"
            );
            self.storage = BytesMut::zeroed(self.capacity);
        }
    }
}

//! Buffer handle returned by the pool.

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::Weak;
use std::sync::atomic::{AtomicUsize, Ordering};

use bytes::{Bytes, BytesMut};

/// An exact-size byte buffer handed out by a [`Pool`](crate::Pool).
///
/// The buffer is either a view carved from one of the pool's shards, or a
/// standalone allocation for requests the shards cannot serve. Both kinds
/// behave identically for the caller: `len()` and capacity always equal the
/// requested size, so writes can never spill into a neighbouring view.
///
/// # Contents
///
/// Fresh buffers are not guaranteed to be zeroed. Call [`Buffer::clear`]
/// when the contents matter.
///
/// # Release
///
/// A shard-backed buffer holds a weak back-reference to its shard's live
/// counter. Releasing the buffer (via [`Buffer::done`], [`Buffer::release`]
/// or simply dropping it) gives up the view and decrements that counter.
/// Once every buffer carved from a shard has been released, the shard may
/// start over from offset zero the next time the pool selects it.
///
/// # Example
///
/// ```
/// use shardbuf::Pool;
///
/// let pool = Pool::with_shard_size(1024)?;
///
/// let mut buf = pool.make(15);
/// assert_eq!(buf.len(), 15);
///
/// buf.clear();
/// buf[0] = b'x';
/// buf.done();
/// # Ok::<(), shardbuf::PoolError>(())
/// ```
pub struct Buffer {
    data: BytesMut,
    shard: Option<Weak<AtomicUsize>>,
}

impl Buffer {
    /// Allocates a standalone buffer of `len` bytes.
    pub(crate) fn standalone(len: usize) -> Self {
        Self {
            data: BytesMut::zeroed(len),
            shard: None,
        }
    }

    /// Wraps a view claimed from a shard.
    pub(crate) fn pooled(data: BytesMut, live: Weak<AtomicUsize>) -> Self {
        Self {
            data,
            shard: Some(live),
        }
    }

    /// Returns the number of bytes in the buffer.
    ///
    /// This is the size that was requested, or zero after release.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the buffer has no bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns true while the buffer is a view into a pool shard.
    ///
    /// Standalone buffers, and any buffer after release, return false.
    pub fn is_pooled(&self) -> bool {
        self.shard.is_some()
    }

    /// Zeroes every byte of the buffer.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Returns the buffer contents.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Returns the buffer contents mutably.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Copies the contents into an immutable [`Bytes`].
    ///
    /// The copy does not reference the shard, so it may outlive the buffer.
    pub fn to_bytes(&self) -> Bytes {
        Bytes::copy_from_slice(&self.data)
    }

    /// Releases the buffer back to its shard.
    ///
    /// Afterwards the buffer is empty and no longer pooled. Calling this
    /// more than once has no further effect, and it is a no-op for
    /// standalone buffers.
    pub fn release(&mut self) {
        // The view has to be gone before the counter drops: a shard that
        // observes zero reclaims its whole allocation.
        drop(std::mem::take(&mut self.data));

        if let Some(live) = self.shard.take().and_then(|weak| weak.upgrade()) {
            live.fetch_sub(1, Ordering::AcqRel);
        }
    }

    /// Consumes the buffer, releasing it back to its shard.
    ///
    /// Equivalent to dropping the buffer; spelled out for call sites that
    /// want the release to be visible.
    pub fn done(mut self) {
        self.release();
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        self.release();
    }
}

impl Deref for Buffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.data
    }
}

impl DerefMut for Buffer {
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl AsRef<[u8]> for Buffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl AsMut<[u8]> for Buffer {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("len", &self.data.len())
            .field("pooled", &self.is_pooled())
            .finish()
    }
}

//! shardbuf
//!
//! Sub-allocator for short-lived byte buffers.
//!
//! Putting byte buffers in a general-purpose object pool has two problems:
//! the buffer you get back may be too small for the request, and a single
//! giant buffer returned to the pool wastes memory for every small request
//! that reuses it afterwards.
//!
//! `shardbuf` takes a different approach. It allocates large fixed-size
//! shards and hands out exact-size views of them, bump-pointer style. Each
//! shard counts its outstanding views; once all of them have been released,
//! the next request that selects the shard starts over from the beginning.
//!
//! The crate intentionally:
//! - does NOT zero buffers on allocation
//! - does NOT grow buffers after allocation
//! - does NOT compact or defragment shards
//! - does NOT pre-allocate shards
//!
//! There is one main tunable, the shard size. Too big and idle shards hold
//! lots of memory; too small and most requests bypass the shards.
//!
//! # Example
//!
//! ```
//! use shardbuf::{Pool, PoolError};
//!
//! fn main() -> Result<(), PoolError> {
//!     let pool = Pool::with_shard_size(1024)?;
//!
//!     let mut buf = pool.make(15);
//!     assert_eq!(buf.len(), 15);
//!
//!     // contents are unspecified until cleared
//!     buf.clear();
//!     buf.copy_from_slice(b"fifteen bytes!!");
//!
//!     // hand the bytes back; dropping the buffer does the same
//!     buf.done();
//!     Ok(())
//! }
//! ```
//!
//! # Release
//!
//! A buffer that is never released keeps the rest of its shard busy until
//! it is dropped. Buffers release themselves on drop, so this only happens
//! with leaked handles.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod buffer;
mod config;
mod error;
mod pool;
mod shard; // internal bump allocator

//
// Public surface
//

pub use buffer::Buffer;
pub use config::{
    DEFAULT_MAX_POOLED_SHARDS, DEFAULT_MAX_RETRIES, DEFAULT_SHARD_SIZE, PoolConfig,
};
pub use error::PoolError;
pub use pool::{Pool, PoolStats};

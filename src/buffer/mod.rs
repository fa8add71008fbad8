//! Buffer handles.
//!
//! A [`Buffer`] is what callers get back from the pool: an exact-size
//! mutable byte region that releases itself on drop.

mod handle;

pub use handle::Buffer;

//! Configuration for pool behavior.
//!
//! [`PoolConfig`] controls the shard size, how hard a single allocation
//! searches the idle shards before creating a new one, and how many idle
//! shards the pool keeps around.
//!
//! # Example
//!
//! ```
//! use shardbuf::PoolConfig;
//!
//! // Custom shard size
//! let config = PoolConfig::new(16 * 1024)?;
//!
//! // Inspect up to four idle shards per allocation
//! let config = PoolConfig::default().with_max_retries(4);
//!
//! # Ok::<(), shardbuf::PoolError>(())
//! ```

use crate::error::PoolError;

/// Default shard size (64 KiB).
pub const DEFAULT_SHARD_SIZE: usize = 64 * 1024;

/// Default number of idle shards inspected per allocation.
pub const DEFAULT_MAX_RETRIES: usize = 1;

/// Default number of idle shards kept for reuse.
pub const DEFAULT_MAX_POOLED_SHARDS: usize = 64;

/// Configuration for a [`Pool`](crate::Pool).
///
/// # Shard Size
///
/// Every shard the pool creates has exactly `shard_size` bytes. Requests of
/// `shard_size` bytes or more (and empty requests) are never carved from a
/// shard; they get a standalone allocation instead. The shard size should
/// therefore be large compared to the typical request: too small and most
/// requests bypass the pool, too large and every idle shard pins a lot of
/// memory.
///
/// # Retries
///
/// `max_retries` bounds how many idle shards a single allocation inspects
/// before creating a fresh one. It is a pure tuning knob: any value yields a
/// correct allocator. Zero is accepted and behaves like one.
///
/// # Example
///
/// ```
/// use shardbuf::PoolConfig;
///
/// let config = PoolConfig::default()
///     .with_shard_size(4096)
///     .with_max_retries(2)
///     .with_max_pooled_shards(16);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.shard_size(), 4096);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolConfig {
    /// Capacity of every shard in bytes.
    shard_size: usize,

    /// Idle shards inspected per allocation before creating a new one.
    max_retries: usize,

    /// Maximum number of idle shards kept for reuse.
    max_pooled_shards: usize,
}

impl PoolConfig {
    /// Creates a new configuration with the given shard size and default
    /// retry and pooling limits.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidConfig`] if `shard_size` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use shardbuf::PoolConfig;
    ///
    /// let config = PoolConfig::new(1024)?;
    /// assert_eq!(config.shard_size(), 1024);
    /// assert!(PoolConfig::new(0).is_err());
    /// # Ok::<(), shardbuf::PoolError>(())
    /// ```
    pub fn new(shard_size: usize) -> Result<Self, PoolError> {
        let config = Self {
            shard_size,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Sets the shard size.
    ///
    /// Note: This does not validate the configuration. Use
    /// [`PoolConfig::validate`] to check it.
    pub fn with_shard_size(mut self, size: usize) -> Self {
        self.shard_size = size;
        self
    }

    /// Sets how many idle shards one allocation may inspect.
    pub fn with_max_retries(mut self, retries: usize) -> Self {
        self.max_retries = retries;
        self
    }

    /// Sets how many idle shards the pool keeps.
    ///
    /// Note: This does not validate the configuration.
    pub fn with_max_pooled_shards(mut self, shards: usize) -> Self {
        self.max_pooled_shards = shards;
        self
    }

    /// Returns the shard size.
    pub fn shard_size(&self) -> usize {
        self.shard_size
    }

    /// Returns the configured retry budget.
    pub fn max_retries(&self) -> usize {
        self.max_retries
    }

    /// Returns the number of idle shards inspected per allocation.
    ///
    /// Always at least one, whatever `max_retries` says.
    pub fn attempts(&self) -> usize {
        self.max_retries.max(1)
    }

    /// Returns the maximum number of idle shards kept.
    pub fn max_pooled_shards(&self) -> usize {
        self.max_pooled_shards
    }

    /// Validates the current configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use shardbuf::PoolConfig;
    ///
    /// let config = PoolConfig::default().with_shard_size(0);
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), PoolError> {
        if self.shard_size == 0 {
            return Err(PoolError::InvalidConfig {
                message: "shard_size must be non-zero",
            });
        }

        if self.max_pooled_shards == 0 {
            return Err(PoolError::InvalidConfig {
                message: "max_pooled_shards must be non-zero",
            });
        }

        Ok(())
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            shard_size: DEFAULT_SHARD_SIZE,
            max_retries: DEFAULT_MAX_RETRIES,
            max_pooled_shards: DEFAULT_MAX_POOLED_SHARDS,
        }
    }
}

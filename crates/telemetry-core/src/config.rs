/// Configuration for a [`crate::ShardedBuffer`] / [`crate::Sampler`].
///
/// Both `shards` and `capacity` must be powers of two; `capacity` is the
/// per-shard, per-buffer slot count, and `shards` is the number of producer
/// lanes a metric's buffer is split into.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Number of shards per buffer, as a power of 2 (default: 64).
    pub shard_bits: u8,
    /// Per-shard slot capacity, as a power of 2 (default: 512 = 2^9).
    pub capacity_bits: u8,
}

impl Config {
    /// Creates a new configuration with custom sizing.
    ///
    /// # Panics
    ///
    /// Panics if `shard_bits` or `capacity_bits` is 0 or greater than 20
    /// (1M shards/slots max) to prevent excessive memory usage.
    pub const fn new(shard_bits: u8, capacity_bits: u8) -> Self {
        assert!(shard_bits > 0 && shard_bits <= 20, "shard_bits must be between 1 and 20");
        assert!(capacity_bits > 0 && capacity_bits <= 20, "capacity_bits must be between 1 and 20");

        Self { shard_bits, capacity_bits }
    }

    /// Returns the number of shards.
    #[inline]
    pub const fn shards(&self) -> usize {
        1 << self.shard_bits
    }

    /// Returns the per-shard slot capacity.
    #[inline]
    pub const fn capacity(&self) -> usize {
        1 << self.capacity_bits
    }

    /// Returns the mask used to wrap a write index into `[0, capacity)`.
    #[inline]
    pub const fn capacity_mask(&self) -> usize {
        self.capacity() - 1
    }

    /// Returns the mask used to wrap a thread id into `[0, shards)`.
    #[inline]
    pub const fn shard_mask(&self) -> usize {
        self.shards() - 1
    }
}

impl Default for Config {
    fn default() -> Self {
        // Reference values: 64 shards, 512-entry per-shard buffers.
        Self { shard_bits: 6, capacity_bits: 9 }
    }
}

/// Preset for metrics recorded by very wide thread-pools, trading memory for
/// further-reduced cross-thread contention (256 shards, 1024-entry buffers).
pub const HIGH_CARDINALITY_CONFIG: Config = Config::new(8, 10);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_reference_sizing() {
        let c = Config::default();
        assert_eq!(c.shards(), 64);
        assert_eq!(c.capacity(), 512);
    }

    #[test]
    fn masks_wrap_correctly() {
        let c = Config::new(2, 3); // 4 shards, 8-capacity
        assert_eq!(c.shard_mask(), 3);
        assert_eq!(c.capacity_mask(), 7);
    }
}

//! Glues a [`ShardedBuffer`] to a [`Strategy`]: the full hot-path/cold-path
//! pairing a telemetry object records through and captures from.

use crate::config::Config;
use crate::numeric::Numeric;
use crate::sample::Sample;
use crate::sharded_buffer::ShardedBuffer;
use crate::strategy::Strategy;
use std::sync::Mutex;

/// Couples one sharded buffer to one reduction strategy.
///
/// `record` is the hot-path producer entry point; `capture` is the
/// cold-path collector entry point. A `Sampler` may be shared across any
/// number of producer threads and is intended to be driven by exactly one
/// collector thread.
pub struct Sampler<T: Numeric> {
    buffer: ShardedBuffer<T>,
    strategy: Strategy<T>,
    scratch: Mutex<Vec<T>>,
}

impl<T: Numeric> Sampler<T> {
    /// Creates a sampler with the given buffer sizing and reduction
    /// strategy.
    pub fn new(config: Config, strategy: Strategy<T>) -> Self {
        Self {
            buffer: ShardedBuffer::new(config),
            strategy,
            scratch: Mutex::new(Vec::new()),
        }
    }

    /// Records one value from the calling thread. Wait-free, never blocks
    /// on the collector.
    #[inline]
    pub fn record(&self, value: T) {
        self.buffer.append(value);
    }

    /// Flips every shard, concatenates the drained windows into a scratch
    /// batch, and reduces it with this sampler's strategy.
    ///
    /// Returns `None` if the total drained count is zero (the normal
    /// steady-state for a quiescent metric); otherwise returns `Some` with
    /// `count` overwritten to the observed total, regardless of what the
    /// strategy itself set.
    pub fn capture(&self, now_us: i64) -> Option<Sample<T>> {
        let mut scratch = self.scratch.lock().unwrap_or_else(|poison| poison.into_inner());
        scratch.clear();
        let total = self.buffer.drain_all(&mut scratch);
        if total == 0 {
            return None;
        }
        let mut sample = self.strategy.apply(&scratch, now_us);
        sample.count = total;
        Some(sample)
    }

    /// Returns the configuration this sampler's buffer was built with.
    pub fn config(&self) -> Config {
        self.buffer.config()
    }
}

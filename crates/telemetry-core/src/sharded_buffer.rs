//! Lock-free, lossy-on-overflow sharded double-buffer.
//!
//! A [`ShardedBuffer<T>`] is the hot-path write target for a single metric:
//! producers append values with no locking and no allocation, partitioned
//! across `Config::shards()` lanes to keep cross-thread contention low. The
//! collector periodically calls [`ShardedBuffer::drain_all`] to flip every
//! shard's active slot and harvest the inactive one.

use crate::config::Config;
use crate::shard::Shard;
use crossbeam_utils::CachePadded;
use std::cell::Cell;
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_THREAD_ID: AtomicUsize = AtomicUsize::new(0);

thread_local! {
    static THREAD_ID: Cell<Option<usize>> = const { Cell::new(None) };
}

/// Returns a process-unique id for the calling thread, assigned on first use
/// and cached for the thread's lifetime. Used to pick a producer's shard.
#[inline]
fn thread_shard_id() -> usize {
    THREAD_ID.with(|cell| {
        if let Some(id) = cell.get() {
            return id;
        }
        let id = NEXT_THREAD_ID.fetch_add(1, Ordering::Relaxed);
        cell.set(Some(id));
        id
    })
}

/// A metric's hot-path write target: `Config::shards()` independent
/// producer lanes, each a double-buffered [`Shard`].
///
/// `append` is wait-free: a shard lookup, an atomic load, and a fetch-add.
/// It never blocks, allocates, or contends with the collector thread beyond
/// a single atomic load of the shard's `current` selector.
pub struct ShardedBuffer<T> {
    shards: Box<[CachePadded<Shard<T>>]>,
    config: Config,
}

impl<T: Copy> ShardedBuffer<T> {
    /// Creates a new buffer with `config.shards()` lanes, each holding two
    /// `config.capacity()`-entry slots. Each shard is cache-line padded so
    /// independent producers never false-share a cache line.
    pub fn new(config: Config) -> Self {
        let shards = (0..config.shards()).map(|_| CachePadded::new(Shard::new(config.capacity()))).collect::<Vec<_>>().into_boxed_slice();
        Self { shards, config }
    }

    /// Appends a value to the calling thread's shard. Never blocks.
    #[inline]
    pub fn append(&self, value: T) {
        let shard = thread_shard_id() & self.config.shard_mask();
        self.shards[shard].append(value, self.config.capacity_mask());
    }

    /// Flips and drains every shard, appending all retained values into
    /// `out`. Cross-shard ordering is not defined; within a shard, values
    /// are appended in insertion order. Returns the total number of values
    /// retained across all shards (overflowed values are not counted).
    ///
    /// Intended to be called from a single collector thread; concurrent
    /// calls from multiple collectors are not supported (the CAS-based flip
    /// is safe, but two collectors could each observe and drain disjoint
    /// halves of an in-flight append run, double-counting nothing but also
    /// giving no stronger guarantee than a single collector already gets).
    pub fn drain_all(&self, out: &mut Vec<T>) -> u64 {
        let mask = self.config.capacity_mask();
        let mut total = 0u64;
        for shard in self.shards.iter() {
            total += shard.flip_and_drain(mask, out);
        }
        total
    }

    /// Returns the configuration this buffer was built with.
    pub fn config(&self) -> Config {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drains_everything_below_capacity() {
        let config = Config::new(2, 4); // 4 shards, 16 capacity
        let buf = ShardedBuffer::<i64>::new(config);
        for i in 0..10 {
            buf.append(i);
        }
        let mut out = Vec::new();
        let retained = buf.drain_all(&mut out);
        assert_eq!(retained, 10);
        assert_eq!(out.len(), 10);
    }

    #[test]
    fn second_drain_after_empty_epoch_is_empty() {
        let config = Config::new(1, 3);
        let buf = ShardedBuffer::<i64>::new(config);
        buf.append(1);
        let mut out = Vec::new();
        buf.drain_all(&mut out);
        out.clear();
        let retained = buf.drain_all(&mut out);
        assert_eq!(retained, 0);
        assert!(out.is_empty());
    }

    #[test]
    fn overflow_retains_capacity_worth_of_values() {
        let config = Config::new(1, 3); // 2 shards, capacity 8 each
        let buf = ShardedBuffer::<i64>::new(config);
        // Single thread => always shard 0; push far past capacity.
        for i in 0..100 {
            buf.append(i);
        }
        let mut out = Vec::new();
        let retained = buf.drain_all(&mut out);
        assert_eq!(retained, 8);
        assert_eq!(out, vec![92, 93, 94, 95, 96, 97, 98, 99]);
    }

    #[test]
    fn concurrent_producers_lose_no_values_below_capacity() {
        use std::sync::Arc;
        use std::thread;

        let config = Config::new(3, 8); // 8 shards, 256 capacity: plenty of headroom
        let buf = Arc::new(ShardedBuffer::<i64>::new(config));
        let threads: Vec<_> = (0..8)
            .map(|t| {
                let buf = Arc::clone(&buf);
                thread::spawn(move || {
                    for i in 0..20 {
                        buf.append(t * 100 + i);
                    }
                })
            })
            .collect();
        for t in threads {
            t.join().unwrap();
        }
        let mut out = Vec::new();
        let retained = buf.drain_all(&mut out);
        assert_eq!(retained, 160);
        assert_eq!(out.len(), 160);
    }
}

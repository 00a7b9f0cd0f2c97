//! Per-shard double-buffered producer slot.
//!
//! A [`Shard`] owns two [`Slot`]s and an atomic selector naming which one is
//! currently producer-visible. `append` always writes into the selected
//! slot; `flip` atomically swaps the selector and hands the now-inactive
//! slot to the caller for exclusive draining.
//!
//! # Memory ordering
//!
//! - `current` selection: Acquire on load (append's fast path), Acquire on
//!   the CAS loop's compare, Release on success — a successful flip
//!   publishes the fact that the old slot is now collector-owned, and the
//!   next `append` on the new slot happens-after that publication.
//! - `write_index` fetch-add: Relaxed. The happens-before edge a drain needs
//!   is carried by the `current` swap, not by `write_index` itself: once the
//!   collector has observed (via the flip) that a slot is inactive, no
//!   producer can still be appending to it, so a plain exchange on
//!   `write_index` is enough to read the final count.
//! - `write_index` exchange to 0 on drain: Acq-Rel, matching §4.1/§5 of
//!   `SPEC_FULL.md`.

use crate::invariants::{debug_assert_drained_within_capacity, debug_assert_monotonic, debug_assert_valid_buffer_index};
use std::cell::UnsafeCell;
use std::mem::MaybeUninit;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// One producer-visible buffer: a fixed power-of-two array plus a monotone
/// write index.
struct Slot<T> {
    buffer: UnsafeCell<Box<[MaybeUninit<T>]>>,
    write_index: AtomicU64,
}

// SAFETY: `buffer` is only ever mutated by the producer thread currently
// selected by `Shard::current`, and only read by the collector after a
// `flip` has moved `current` away from it (see module docs). No two threads
// touch it concurrently.
unsafe impl<T: Send> Send for Slot<T> {}
unsafe impl<T: Send> Sync for Slot<T> {}

impl<T: Copy> Slot<T> {
    fn new(capacity: usize) -> Self {
        let mut buffer = Vec::with_capacity(capacity);
        buffer.resize_with(capacity, MaybeUninit::uninit);
        Self {
            buffer: UnsafeCell::new(buffer.into_boxed_slice()),
            write_index: AtomicU64::new(0),
        }
    }

    #[inline]
    fn append(&self, value: T, mask: usize) {
        let idx = self.write_index.fetch_add(1, Ordering::Relaxed);
        debug_assert_monotonic!("write_index", idx, idx.wrapping_add(1));
        let slot = (idx as usize) & mask;
        // SAFETY: the caller (`Shard::append`) only reaches this slot while
        // it is the producer-active buffer; the collector never touches it
        // until a `flip` has moved `current` elsewhere.
        unsafe {
            let buf = &mut *self.buffer.get();
            buf[slot].write(value);
        }
    }

    /// Exchanges `write_index` to 0 and appends the retained window, in
    /// insertion order, to `out`. Returns the number of values retained
    /// (`min(observed_count, capacity)`).
    ///
    /// On overflow the retained window is the *last* `capacity` entries in
    /// insertion order — the simpler, well-defined overflow policy called
    /// for in `spec.md` §9 rather than attempting to reconstruct the exact
    /// wrap boundary.
    fn drain(&self, mask: usize, out: &mut Vec<T>) -> u64 {
        let observed = self.write_index.swap(0, Ordering::AcqRel);
        if observed == 0 {
            return 0;
        }

        let capacity = (mask + 1) as u64;
        let retained = observed.min(capacity);
        debug_assert_drained_within_capacity!(retained, capacity);
        let start = observed - retained;

        // SAFETY: the collector owns this slot exclusively once the
        // corresponding `Shard::flip` has completed; every index in
        // `[start, observed)` was written by the producer during the epoch
        // that just ended.
        let buf = unsafe { &*self.buffer.get() };
        for seq in start..observed {
            let slot = (seq as usize) & mask;
            out.push(unsafe { buf[slot].assume_init_read() });
        }
        retained
    }
}

/// A single producer lane: two slots and a selector naming which is
/// currently producer-visible.
pub(crate) struct Shard<T> {
    slots: [Slot<T>; 2],
    current: AtomicUsize,
}

impl<T: Copy> Shard<T> {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            slots: [Slot::new(capacity), Slot::new(capacity)],
            current: AtomicUsize::new(0),
        }
    }

    #[inline]
    pub(crate) fn append(&self, value: T, mask: usize) {
        let cur = self.current.load(Ordering::Acquire);
        self.slots[cur].append(value, mask);
    }

    /// Atomically swaps `current` to the other slot and returns the index of
    /// the now-inactive one, exclusively owned by the caller until the next
    /// `flip`.
    fn flip(&self) -> usize {
        let mut prev = self.current.load(Ordering::Acquire);
        loop {
            let next = prev ^ 1;
            match self.current.compare_exchange_weak(prev, next, Ordering::AcqRel, Ordering::Acquire) {
                Ok(_) => break,
                Err(actual) => prev = actual,
            }
        }
        debug_assert_valid_buffer_index!(prev);
        prev
    }

    /// Flips this shard and drains the now-inactive slot into `out`.
    /// Returns the number of values retained.
    pub(crate) fn flip_and_drain(&self, mask: usize, out: &mut Vec<T>) -> u64 {
        let inactive = self.flip();
        self.slots[inactive].drain(mask, out)
    }
}

//! Debug assertion macros for sharded buffer and MPSC queue invariants.
//!
//! These macros provide runtime checks for the invariants documented in
//! `SPEC_FULL.md` §3/§5. They are only active in debug builds
//! (`#[cfg(debug_assertions)]`), so there is zero overhead in release builds.
//!
//! Used by `ShardedBuffer<T>` and `MpscQueue<T>`.

// =============================================================================
// INV-BUF-01: Drained Window Bound
// =============================================================================

/// Assert that a drained window never exceeds the slot capacity.
///
/// **Invariant**: `0 ≤ drained_len ≤ capacity`
///
/// Used in: `Slot::drain()` after computing the retained window length.
macro_rules! debug_assert_drained_within_capacity {
    ($drained:expr, $capacity:expr) => {
        debug_assert!(
            $drained <= $capacity,
            "INV-BUF-01 violated: drained {} exceeds capacity {}",
            $drained,
            $capacity
        )
    };
}

// =============================================================================
// INV-BUF-02: Write Index Monotonicity Within an Epoch
// =============================================================================

/// Assert that a producer epoch's write index only increases between appends.
///
/// **Invariant**: within one epoch (between two drains), `write_index` is
/// non-decreasing.
///
/// Used in: `Slot::append()` after the fetch-add.
macro_rules! debug_assert_monotonic {
    ($name:literal, $old:expr, $new:expr) => {
        debug_assert!(
            $new >= $old,
            "INV-BUF-02 violated: {} decreased from {} to {}",
            $name,
            $old,
            $new
        )
    };
}

// =============================================================================
// INV-BUF-03: Current Always Points at an Owned Buffer
// =============================================================================

/// Assert that a shard's `current` selector is one of the two valid indices.
///
/// **Invariant**: `current ∈ {0, 1}`.
///
/// Used in: `Shard::flip()` after the CAS loop succeeds.
macro_rules! debug_assert_valid_buffer_index {
    ($idx:expr) => {
        debug_assert!(
            $idx == 0 || $idx == 1,
            "INV-BUF-03 violated: buffer index {} is neither 0 nor 1",
            $idx
        )
    };
}

// =============================================================================
// INV-Q-01: Stub Never Observably Returned
// =============================================================================

/// Assert that `try_take` never hands the stub node's payload to a caller.
///
/// **Invariant**: the stub node is a sentinel; its value is never read.
///
/// Used in: `MpscQueue::try_take()` once a non-stub node has been identified.
macro_rules! debug_assert_not_stub {
    ($is_stub:expr) => {
        debug_assert!(!$is_stub, "INV-Q-01 violated: stub payload observed by consumer")
    };
}

// =============================================================================
// INV-Q-02: Pointer Validity
// =============================================================================

/// Assert that a node pointer used by the single consumer is not null.
///
/// Used in: `MpscQueue::try_take()` before dereferencing `tail`.
macro_rules! debug_assert_valid_node_ptr {
    ($ptr:expr) => {
        debug_assert!(!$ptr.is_null(), "INV-Q-02 violated: null node pointer")
    };
}

// =============================================================================
// Re-exports for crate-internal use
// =============================================================================

pub(crate) use debug_assert_drained_within_capacity;
pub(crate) use debug_assert_monotonic;
pub(crate) use debug_assert_not_stub;
pub(crate) use debug_assert_valid_buffer_index;
pub(crate) use debug_assert_valid_node_ptr;

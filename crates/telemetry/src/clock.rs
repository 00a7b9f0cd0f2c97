//! Process-wide monotonic clock, shared by the runtime's flush loop and by
//! telemetry objects that stamp events off the hot path (where `capture`
//! doesn't hand them a `now_us`, e.g. `Logger::log`).
//!
//! Event timestamps must be monotonic per `SPEC_FULL.md` §4.4 (matching the
//! original's `steady_clock::now()`), not wall-clock time: a wall clock can
//! jump backwards under NTP adjustment, which a `SystemTime`-stamped Event
//! cannot recover from once published.

use std::sync::OnceLock;
use std::time::Instant;

/// Microseconds elapsed since this process's telemetry clock was first read.
/// The epoch is lazily fixed on first call and shared by every caller.
pub(crate) fn now_monotonic_us() -> i64 {
    static EPOCH: OnceLock<Instant> = OnceLock::new();
    EPOCH.get_or_init(Instant::now).elapsed().as_micros() as i64
}

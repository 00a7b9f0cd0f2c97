/// A single summarized observation produced by a [`crate::Sampler::capture`]
/// call: one representative value, the collector-side timestamp, and the
/// total number of underlying recordings it summarizes.
///
/// `count` is always set by the `Sampler`, not by the strategy that produced
/// `value` — a strategy only ever picks or computes `value`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample<T> {
    pub value: T,
    pub timestamp_us: i64,
    pub count: u64,
}

impl<T> Sample<T> {
    pub fn new(value: T, timestamp_us: i64, count: u64) -> Self {
        Self { value, timestamp_us, count }
    }
}

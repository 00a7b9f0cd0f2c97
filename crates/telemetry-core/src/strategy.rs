//! Pure reduction strategies from a drained batch to one [`Sample`].
//!
//! Every strategy function has the shape `(values, now_us) -> Sample<T>`
//! and must not retain `values` past its return — the batch is scratch
//! space owned by the calling [`crate::Sampler`] and reused on the next
//! capture.

use crate::numeric::Numeric;
use crate::sample::Sample;
use rand::Rng;
use std::sync::Arc;

/// Reservoir size a `weighted_reservoir` strategy falls back to when the
/// caller doesn't specify one (the reference value from `SPEC_FULL.md` §6).
pub const DEFAULT_RESERVOIR_SIZE: usize = 256;

/// A pluggable batch-reduction strategy.
///
/// `Strategy::default()` is `WeightedReservoir` at [`DEFAULT_RESERVOIR_SIZE`],
/// matching the Counter's default configuration.
pub enum Strategy<T: Numeric> {
    Uniform,
    WeightedReservoir { reservoir_size: usize },
    P99,
    Avg,
    Min,
    Max,
    UserDefined(Arc<dyn Fn(&[T], i64) -> Sample<T> + Send + Sync>),
}

impl<T: Numeric> Strategy<T> {
    /// Applies this strategy to a non-empty batch. `values` must not be
    /// empty; the `Sampler` only calls strategies once it has confirmed a
    /// non-zero drained count.
    pub fn apply(&self, values: &[T], now_us: i64) -> Sample<T> {
        debug_assert!(!values.is_empty(), "strategies are only applied to non-empty batches");
        match self {
            Strategy::Uniform => uniform(values, now_us),
            Strategy::WeightedReservoir { reservoir_size } => weighted_reservoir(values, now_us, *reservoir_size),
            Strategy::P99 => p99(values, now_us),
            Strategy::Avg => avg(values, now_us),
            Strategy::Min => min(values, now_us),
            Strategy::Max => max(values, now_us),
            Strategy::UserDefined(f) => f(values, now_us),
        }
    }
}

impl<T: Numeric> Default for Strategy<T> {
    fn default() -> Self {
        Strategy::WeightedReservoir { reservoir_size: DEFAULT_RESERVOIR_SIZE }
    }
}

impl<T: Numeric> Clone for Strategy<T> {
    fn clone(&self) -> Self {
        match self {
            Strategy::Uniform => Strategy::Uniform,
            Strategy::WeightedReservoir { reservoir_size } => Strategy::WeightedReservoir { reservoir_size: *reservoir_size },
            Strategy::P99 => Strategy::P99,
            Strategy::Avg => Strategy::Avg,
            Strategy::Min => Strategy::Min,
            Strategy::Max => Strategy::Max,
            Strategy::UserDefined(f) => Strategy::UserDefined(Arc::clone(f)),
        }
    }
}

/// Picks one element uniformly at random from `values`.
pub fn uniform<T: Numeric>(values: &[T], now_us: i64) -> Sample<T> {
    let idx = rand::thread_rng().gen_range(0..values.len());
    Sample::new(values[idx], now_us, values.len() as u64)
}

/// Fills a reservoir of up to `reservoir_size` elements using Vitter's
/// Algorithm R over `values`, then picks uniformly from the reservoir.
pub fn weighted_reservoir<T: Numeric>(values: &[T], now_us: i64, reservoir_size: usize) -> Sample<T> {
    let mut rng = rand::thread_rng();
    let take = reservoir_size.min(values.len()).max(1);
    let mut reservoir: Vec<T> = values[..take].to_vec();

    for (i, &v) in values.iter().enumerate().skip(take) {
        let j = rng.gen_range(0..=i);
        if j < reservoir.len() {
            reservoir[j] = v;
        }
    }

    let idx = rng.gen_range(0..reservoir.len());
    Sample::new(reservoir[idx], now_us, values.len() as u64)
}

/// Returns the element at `floor(0.99 * (n - 1))` of the sorted batch.
///
/// Sorts by `T::to_f64`'s `total_cmp` rather than `partial_cmp` so a
/// producer recording `NaN` sorts to a well-defined (if unhelpful) position
/// instead of panicking — the strategy must not crash the collector thread
/// on a value a hot-path caller could legally record.
pub fn p99<T: Numeric>(values: &[T], now_us: i64) -> Sample<T> {
    let mut sorted: Vec<T> = values.to_vec();
    sorted.sort_by(|a, b| a.to_f64().total_cmp(&b.to_f64()));
    let idx = ((0.99 * (sorted.len() - 1) as f64).floor()) as usize;
    Sample::new(sorted[idx], now_us, values.len() as u64)
}

/// Arithmetic mean, accumulated as `f64` and cast back to `T`.
pub fn avg<T: Numeric>(values: &[T], now_us: i64) -> Sample<T> {
    let sum: f64 = values.iter().map(|v| v.to_f64()).sum();
    let mean = sum / values.len() as f64;
    Sample::new(T::from_f64(mean), now_us, values.len() as u64)
}

/// Minimum element of the batch.
pub fn min<T: Numeric>(values: &[T], now_us: i64) -> Sample<T> {
    let v = values.iter().copied().fold(values[0], |a, b| if b.to_f64() < a.to_f64() { b } else { a });
    Sample::new(v, now_us, values.len() as u64)
}

/// Maximum element of the batch.
pub fn max<T: Numeric>(values: &[T], now_us: i64) -> Sample<T> {
    let v = values.iter().copied().fold(values[0], |a, b| if b.to_f64() > a.to_f64() { b } else { a });
    Sample::new(v, now_us, values.len() as u64)
}

/// Hoeffding-bound sample size for confidence `c` and error bound `ε`:
/// `⌈ -ln((1-c)/2) / (2·ε²) ⌉`.
pub fn hoeffding_sample_size(confidence: f64, epsilon: f64) -> usize {
    let numerator = -((1.0 - confidence) / 2.0).ln();
    let denominator = 2.0 * epsilon * epsilon;
    (numerator / denominator).ceil() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn avg_of_simple_batch() {
        let sample = avg(&[10.0, 20.0, 30.0], 0);
        assert_eq!(sample.value, 20.0);
        assert_eq!(sample.count, 3);
    }

    #[test]
    fn min_max_on_unsorted_batch() {
        let values = [5.0, 1.0, 9.0, 3.0];
        assert_eq!(min(&values, 0).value, 1.0);
        assert_eq!(max(&values, 0).value, 9.0);
    }

    #[test]
    fn p99_picks_expected_index() {
        let values: Vec<f64> = (0..100).map(|i| i as f64).collect();
        let sample = p99(&values, 0);
        // floor(0.99 * 99) = 98
        assert_eq!(sample.value, 98.0);
    }

    #[test]
    fn uniform_always_returns_a_batch_member() {
        let values = [1.0, 2.0, 3.0];
        for _ in 0..50 {
            let sample = uniform(&values, 0);
            assert!(values.contains(&sample.value));
            assert_eq!(sample.count, 3);
        }
    }

    #[test]
    fn weighted_reservoir_count_matches_batch_len_not_reservoir_size() {
        let values: Vec<f64> = (0..1000).map(|i| i as f64).collect();
        let sample = weighted_reservoir(&values, 0, 256);
        assert_eq!(sample.count, 1000);
        assert!(values.contains(&sample.value));
    }

    #[test]
    fn weighted_reservoir_handles_batches_smaller_than_reservoir() {
        let values = [1.0, 2.0];
        let sample = weighted_reservoir(&values, 0, 256);
        assert_eq!(sample.count, 2);
        assert!(values.contains(&sample.value));
    }

    #[test]
    fn hoeffding_calibration_table() {
        assert_eq!(hoeffding_sample_size(0.99, 0.01), 26492);
        let n_95 = hoeffding_sample_size(0.95, 0.05);
        assert!(n_95 == 737 || n_95 == 738);
        assert_eq!(hoeffding_sample_size(0.90, 0.10), 150);
        assert_eq!(hoeffding_sample_size(0.90, 0.20), 38);
    }

    #[test]
    fn deterministic_strategies_are_pure() {
        let values = [3.0, 1.0, 4.0, 1.0, 5.0];
        assert_eq!(avg(&values, 42), avg(&values, 42));
        assert_eq!(min(&values, 42), min(&values, 42));
        assert_eq!(max(&values, 42), max(&values, 42));
        assert_eq!(p99(&values, 42), p99(&values, 42));
    }
}

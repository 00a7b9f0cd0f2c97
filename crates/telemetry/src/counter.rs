//! Counter: a named numeric telemetry object backed by a
//! [`telemetry_core::Sampler`].

use crate::event::Event;
use crate::sink::Sink;
use std::ops::AddAssign;
use std::sync::Arc;
use std::time::Duration;
use telemetry_core::{Config, Sampler, Strategy};

pub(crate) struct CounterInner {
    name: String,
    sampler: Sampler<f64>,
}

impl CounterInner {
    pub(crate) fn new(name: String, config: Config, strategy: Strategy<f64>) -> Self {
        Self { name, sampler: Sampler::new(config, strategy) }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn record(&self, value: f64) {
        self.sampler.record(value);
    }

    /// Flips and drains this counter's sampler and, if any values were
    /// observed, publishes one `"metric"` Event stamped with the collector's
    /// monotonic `now_us` (matching §4.4's "current monotonic time" — never
    /// a wall-clock reading).
    pub(crate) fn capture(&self, sink: &dyn Sink, now_us: i64) {
        let Some(sample) = self.sampler.capture(now_us) else {
            return;
        };
        let timestamp = Duration::from_micros(now_us as u64);
        let event = Event::new("metric", self.name.clone(), timestamp)
            .with_field("value", sample.value)
            .with_field("count", sample.count as i64);
        sink.publish(event);
    }
}

/// A named counter: `record` observes one value from any thread.
///
/// Two or more `Counter` handles constructed with the same name (via
/// [`crate::Runtime::counter`]) share one underlying producer — this is a
/// cheap `Arc` clone, not a new registration.
#[derive(Clone)]
pub struct Counter {
    pub(crate) inner: Arc<CounterInner>,
}

impl Counter {
    pub(crate) fn new(inner: Arc<CounterInner>) -> Self {
        Self { inner }
    }

    /// Returns this counter's name.
    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// Observes one value. Wait-free; never blocks on the collector.
    #[inline]
    pub fn record(&self, value: f64) {
        self.inner.record(value);
    }
}

impl AddAssign<f64> for Counter {
    /// `counter += value` is sugar for `counter.record(value)`.
    fn add_assign(&mut self, value: f64) {
        self.record(value);
    }
}

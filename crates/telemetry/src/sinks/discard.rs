use crate::event::Event;
use crate::sink::Sink;

/// A sink that drops every event. Useful for benchmarks and tests that
/// don't care about sink output, and for scenarios where only the hot path
/// matters.
#[derive(Debug, Default)]
pub struct DiscardSink;

impl Sink for DiscardSink {
    fn publish(&self, _event: Event) {}
}

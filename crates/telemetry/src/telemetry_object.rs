//! The tagged-variant abstraction the registry dispatches `capture(sink)`
//! through, so one flush loop can drive both Counters and Loggers without
//! knowing which it holds.

use crate::counter::CounterInner;
use crate::logger::LoggerInner;
use crate::sink::Sink;
use std::sync::Arc;

/// A registry-owned telemetry object, tagged by concrete type. Concrete
/// handles (`Counter`, `Logger`) are recovered only by the factory at
/// construction time; the collector only ever calls `capture`.
pub(crate) enum TelemetryObject {
    Counter(Arc<CounterInner>),
    Logger(Arc<LoggerInner>),
}

impl TelemetryObject {
    pub(crate) fn name(&self) -> &str {
        match self {
            TelemetryObject::Counter(c) => c.name(),
            TelemetryObject::Logger(l) => l.name(),
        }
    }

    pub(crate) fn capture(&self, sink: &dyn Sink, now_us: i64) {
        match self {
            TelemetryObject::Counter(c) => c.capture(sink, now_us),
            TelemetryObject::Logger(l) => l.capture(sink),
        }
    }
}

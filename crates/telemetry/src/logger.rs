//! Logger: a named telemetry object backed by the intrusive MPSC queue,
//! for log events that must never be dropped.

use crate::clock::now_monotonic_us;
use crate::event::Event;
use crate::sink::Sink;
use std::sync::Arc;
use std::time::Duration;
use telemetry_core::MpscQueue;

/// Log severity, ordered `Trace < Debug < Info < Warn < Error < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Critical,
}

impl LogLevel {
    /// Renders the level exactly as the wire format requires.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "Trace",
            LogLevel::Debug => "Debug",
            LogLevel::Info => "Info",
            LogLevel::Warn => "Warn",
            LogLevel::Error => "Error",
            LogLevel::Critical => "Critical",
        }
    }
}

struct LogRecord {
    level: LogLevel,
    message: String,
    timestamp: Duration,
}

pub(crate) struct LoggerInner {
    name: String,
    queue: MpscQueue<LogRecord>,
}

impl LoggerInner {
    pub(crate) fn new(name: String) -> Self {
        Self { name, queue: MpscQueue::new() }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    /// Enqueues one log record, stamped with the process's monotonic clock
    /// (matching §4.4's "current monotonic time" — never a wall-clock
    /// reading) rather than the time it happens to be dequeued.
    pub(crate) fn log(&self, level: LogLevel, message: String) {
        let timestamp = Duration::from_micros(now_monotonic_us() as u64);
        self.queue.push(LogRecord { level, message, timestamp });
    }

    /// Dequeues every pending record in FIFO order and publishes one
    /// `"log"` Event per record.
    pub(crate) fn capture(&self, sink: &dyn Sink) {
        while let Some(record) = self.queue.try_take() {
            let event = Event::new("log", self.name.clone(), record.timestamp)
                .with_field("level", record.level.as_str())
                .with_field("message", record.message);
            sink.publish(event);
        }
    }
}

/// A named logger: `log` enqueues a record from any thread without
/// blocking or dropping; `capture` (driven by the runtime) publishes
/// everything pending in exact enqueue order.
#[derive(Clone)]
pub struct Logger {
    pub(crate) inner: Arc<LoggerInner>,
}

impl Logger {
    pub(crate) fn new(inner: Arc<LoggerInner>) -> Self {
        Self { inner }
    }

    /// Returns this logger's name.
    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// Enqueues one log record. Wait-free apart from the queue's node
    /// allocation; never blocks on the collector and never drops.
    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        self.inner.log(level, message.into());
    }

    pub fn trace(&self, message: impl Into<String>) {
        self.log(LogLevel::Trace, message);
    }

    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    pub fn critical(&self, message: impl Into<String>) {
        self.log(LogLevel::Critical, message);
    }
}

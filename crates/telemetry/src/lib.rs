//! In-process telemetry ingestion: application threads record numeric
//! samples and log events through named, registry-owned producers; a
//! background collector thread periodically drains, aggregates, and
//! publishes finished Events to a pluggable sink.
//!
//! The hard algorithmic core — the sharded double-buffer, the intrusive
//! MPSC queue, and the sampling strategies — lives in `telemetry-core`.
//! This crate layers the event model, sinks, the `Counter`/`Logger`
//! telemetry objects, the process-wide registry and flush runtime, and the
//! `Ttl` facade on top of it.
//!
//! ```no_run
//! use telemetry::Ttl;
//!
//! Ttl::init("stdout://").unwrap();
//! let requests = Ttl::counter("requests");
//! requests.record(1.0);
//! Ttl::shutdown();
//! ```

mod clock;
mod counter;
mod error;
mod event;
mod facade;
mod logger;
mod macros;
mod registry;
mod runtime;
mod sink;
mod sinks;
mod telemetry_object;
mod wire;

pub use counter::Counter;
pub use error::{ConfigError, InitError};
pub use event::{Event, HistogramAttachment, Scale, Value};
pub use facade::Ttl;
pub use logger::{LogLevel, Logger};
pub use runtime::{Runtime, RuntimeConfig};
pub use sink::Sink;
pub use sinks::{DiscardSink, FileSink, StdoutSink};

// Re-exported so callers configuring counters don't need a direct
// `telemetry-core` dependency for the common case.
pub use telemetry_core::{Config, Strategy};

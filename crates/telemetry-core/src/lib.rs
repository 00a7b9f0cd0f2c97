//! Lock-free sharded double-buffer, intrusive MPSC queue, and sampling
//! strategies for high-frequency telemetry ingestion.
//!
//! This crate is the hard algorithmic core of the telemetry pipeline: it
//! has no knowledge of telemetry object names, sinks, or the process-wide
//! registry (those live in the `telemetry` crate). It exposes three
//! independent primitives:
//!
//! - [`ShardedBuffer`]: a per-metric, lock-free, lossy-on-overflow buffer
//!   for numeric samples, built from [`Config`]-sized [`Shard`]s.
//! - [`MpscQueue`]: an unbounded intrusive multi-producer/single-consumer
//!   queue, used where loss is not acceptable (log events).
//! - [`Sampler`]: couples a `ShardedBuffer` to a [`Strategy`] for the
//!   hot-path `record` / cold-path `capture` pairing telemetry objects use.
//!
//! Also included: the [`Histogram`] companion utility and the
//! [`hoeffding_sample_size`] reservoir-sizing calculation.

mod config;
mod histogram;
mod invariants;
mod numeric;
mod queue;
mod sample;
mod sampler;
mod shard;
mod sharded_buffer;
mod strategy;

pub use config::{Config, HIGH_CARDINALITY_CONFIG};
pub use histogram::{Histogram, HistogramConfig};
pub use numeric::Numeric;
pub use queue::MpscQueue;
pub use sample::Sample;
pub use sampler::Sampler;
pub use sharded_buffer::ShardedBuffer;
pub use strategy::{avg, hoeffding_sample_size, max, min, p99, uniform, weighted_reservoir, Strategy, DEFAULT_RESERVOIR_SIZE};

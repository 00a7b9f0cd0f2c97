//! The external record a [`crate::Sink`] receives: an immutable value type
//! describing one emitted observation.

use std::time::Duration;
use telemetry_core::Histogram;

/// A field value: the three wire types an Event's fields may hold.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Int(v as i64)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

/// The logarithmic-bucket shape this histogram attachment was computed with.
/// Only `Log` is ever produced by [`telemetry_core::Histogram`]; `Linear` is
/// part of the wire contract for sinks/consumers that might synthesize one
/// by another means.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scale {
    Linear { step: f64 },
    Log { factor: f64 },
}

/// Optional logarithmic-histogram attachment an Event may carry alongside
/// its scalar fields.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramAttachment {
    pub scale: Scale,
    pub bins: usize,
    pub start: f64,
    pub underflow: u64,
    pub counts: Vec<u64>,
    pub overflow: u64,
}

impl From<&Histogram> for HistogramAttachment {
    fn from(h: &Histogram) -> Self {
        let config = h.config();
        Self {
            scale: Scale::Log { factor: config.factor },
            bins: config.bins,
            start: config.start,
            underflow: h.underflow(),
            counts: h.counts().to_vec(),
            overflow: h.overflow(),
        }
    }
}

/// One emitted observation: the record a [`crate::Sink`] receives.
///
/// `fields` preserves insertion order — the wire format emits keys in
/// exactly the order they were added.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub event_type: String,
    pub name: String,
    pub timestamp: Duration,
    pub fields: Vec<(String, Value)>,
    pub histogram: Option<HistogramAttachment>,
}

impl Event {
    /// Creates a new Event with no fields and no histogram attachment.
    pub fn new(event_type: impl Into<String>, name: impl Into<String>, timestamp: Duration) -> Self {
        Self {
            event_type: event_type.into(),
            name: name.into(),
            timestamp,
            fields: Vec::new(),
            histogram: None,
        }
    }

    /// Appends one field, preserving call order.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push((key.into(), value.into()));
        self
    }

    /// Attaches a histogram computed by the producer.
    #[must_use]
    pub fn with_histogram(mut self, histogram: impl Into<HistogramAttachment>) -> Self {
        self.histogram = Some(histogram.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_preserves_field_order() {
        let event = Event::new("metric", "m", Duration::ZERO).with_field("value", 1.0).with_field("count", 2i64);
        assert_eq!(event.fields[0].0, "value");
        assert_eq!(event.fields[1].0, "count");
    }
}

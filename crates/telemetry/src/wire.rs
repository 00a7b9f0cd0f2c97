//! Newline-delimited JSON encoding of [`Event`]s, the external wire format
//! the file and stdout sinks emit. One JSON object per event, in key order;
//! callers are responsible for appending the newline between events.

use crate::event::{Event, HistogramAttachment, Scale, Value};
use std::fmt::Write as _;

/// Encodes one Event as a single-line JSON object. Field order matches
/// insertion order; `type`, `name`, and `ts` always come first.
pub fn encode(event: &Event) -> String {
    let mut out = String::with_capacity(128);
    out.push('{');
    append_key(&mut out, "type", true);
    append_string(&mut out, &event.event_type);
    append_key(&mut out, "name", false);
    append_string(&mut out, &event.name);
    append_key(&mut out, "ts", false);
    write!(out, "{}", event.timestamp.as_nanos()).expect("writing to a String never fails");

    for (key, value) in &event.fields {
        append_key(&mut out, key, false);
        append_value(&mut out, value);
    }

    if let Some(histogram) = &event.histogram {
        append_histogram(&mut out, histogram);
    }

    out.push('}');
    out
}

fn append_key(out: &mut String, key: &str, first: bool) {
    if !first {
        out.push(',');
    }
    append_string(out, key);
    out.push(':');
}

fn append_string(out: &mut String, s: &str) {
    out.push_str(&serde_json::to_string(s).expect("strings always serialize to JSON"));
}

fn append_value(out: &mut String, value: &Value) {
    match value {
        Value::Int(v) => write!(out, "{v}").expect("writing to a String never fails"),
        Value::Float(v) => write!(out, "{v}").expect("writing to a String never fails"),
        Value::Str(v) => append_string(out, v),
    }
}

fn append_histogram(out: &mut String, h: &HistogramAttachment) {
    append_key(out, "scale", false);
    out.push_str(match h.scale {
        Scale::Linear { .. } => "\"linear\"",
        Scale::Log { .. } => "\"log\"",
    });

    append_key(out, "bins", false);
    write!(out, "{}", h.bins).expect("writing to a String never fails");

    append_key(out, "start", false);
    write!(out, "{}", h.start).expect("writing to a String never fails");

    match h.scale {
        Scale::Linear { step } => {
            append_key(out, "step", false);
            write!(out, "{step}").expect("writing to a String never fails");
        }
        Scale::Log { factor } => {
            append_key(out, "factor", false);
            write!(out, "{factor}").expect("writing to a String never fails");
        }
    }

    append_key(out, "underflow", false);
    write!(out, "{}", h.underflow).expect("writing to a String never fails");

    append_key(out, "counts", false);
    out.push('[');
    for (i, count) in h.counts.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write!(out, "{count}").expect("writing to a String never fails");
    }
    out.push(']');

    append_key(out, "overflow", false);
    write!(out, "{}", h.overflow).expect("writing to a String never fails");
}

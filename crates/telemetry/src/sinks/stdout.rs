use crate::event::Event;
use crate::sink::Sink;
use crate::wire;
use std::io::Write;

/// Writes one newline-delimited JSON object per event to stdout.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl Sink for StdoutSink {
    fn publish(&self, event: Event) {
        let line = wire::encode(&event);
        let mut stdout = std::io::stdout().lock();
        if let Err(err) = writeln!(stdout, "{line}") {
            tracing::warn!(error = %err, "stdout sink write failed, dropping event");
        }
    }
}

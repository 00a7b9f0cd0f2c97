use crate::event::Event;
use crate::sink::Sink;
use crate::wire;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

/// Appends one newline-delimited JSON object per event to a file, created
/// if missing (mode `0644` on Unix).
///
/// Write failures are fatal to this sink: per `SPEC_FULL.md` §6, a file
/// sink that can't write panics rather than silently dropping events, since
/// a failing disk is not a condition callers expect to recover from inside
/// the collector thread.
pub struct FileSink {
    file: Mutex<File>,
}

impl FileSink {
    pub fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let mut options = OpenOptions::new();
        options.append(true).create(true);
        #[cfg(unix)]
        options.mode(0o644);
        let file = options.open(path)?;
        Ok(Self { file: Mutex::new(file) })
    }
}

impl Sink for FileSink {
    fn publish(&self, event: Event) {
        let line = wire::encode(&event);
        let mut file = self.file.lock().unwrap_or_else(|poison| poison.into_inner());
        writeln!(file, "{line}").expect("file sink write failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader};
    use std::time::Duration;

    #[test]
    fn writes_one_line_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.ndjson");
        let sink = FileSink::open(&path).unwrap();
        sink.publish(Event::new("metric", "m", Duration::ZERO).with_field("value", 1.0));
        sink.publish(Event::new("metric", "m", Duration::ZERO).with_field("value", 2.0));
        drop(sink);

        let reader = BufReader::new(File::open(&path).unwrap());
        let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"value\":1"));
        assert!(lines[1].contains("\"value\":2"));
    }

    #[test]
    fn reopening_appends_rather_than_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.ndjson");
        {
            let sink = FileSink::open(&path).unwrap();
            sink.publish(Event::new("metric", "m", Duration::ZERO).with_field("value", 1.0));
        }
        {
            let sink = FileSink::open(&path).unwrap();
            sink.publish(Event::new("metric", "m", Duration::ZERO).with_field("value", 2.0));
        }

        let reader = BufReader::new(File::open(&path).unwrap());
        let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines.len(), 2);
    }
}

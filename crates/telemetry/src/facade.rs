//! Static `init(uri)` / `shutdown()` facade: constructs a sink from a URI
//! scheme and starts/stops the process-wide runtime.

use crate::counter::Counter;
use crate::error::{ConfigError, InitError};
use crate::logger::Logger;
use crate::runtime::{Runtime, RuntimeConfig};
use crate::sink::Sink;
use crate::sinks::{DiscardSink, FileSink, StdoutSink};
use std::sync::{Arc, Mutex};
use telemetry_core::Strategy;

static RUNTIME: Mutex<Option<Arc<Runtime>>> = Mutex::new(None);

/// Static facade over the process-wide telemetry runtime.
///
/// `init` is not idempotent — calling it while already running fails with
/// [`InitError::AlreadyRunning`]. `shutdown` is idempotent.
pub struct Ttl;

impl Ttl {
    /// Starts the runtime with a sink constructed from `uri` and the
    /// default [`RuntimeConfig`].
    pub fn init(uri: &str) -> Result<(), InitError> {
        Self::init_with_config(uri, RuntimeConfig::default())
    }

    /// Starts the runtime with a sink constructed from `uri` and an
    /// explicit [`RuntimeConfig`].
    pub fn init_with_config(uri: &str, config: RuntimeConfig) -> Result<(), InitError> {
        let sink = sink_from_uri(uri).map_err(InitError::from)?;

        let mut slot = RUNTIME.lock().unwrap_or_else(|p| p.into_inner());
        if slot.is_some() {
            return Err(InitError::AlreadyRunning);
        }
        *slot = Some(Runtime::start(sink, config));
        Ok(())
    }

    /// Stops the flush thread (after one final capture pass) and releases
    /// the sink. A no-op if the runtime is not currently active.
    pub fn shutdown() {
        let runtime = RUNTIME.lock().unwrap_or_else(|p| p.into_inner()).take();
        if let Some(runtime) = runtime {
            runtime.stop();
        }
    }

    /// Looks up or constructs a Counter with the default
    /// (weighted-reservoir) strategy.
    ///
    /// # Panics
    ///
    /// Panics if the runtime is not running.
    pub fn counter(name: &str) -> Counter {
        current_runtime().counter(name)
    }

    /// Looks up or constructs a Counter with an explicit strategy.
    ///
    /// # Panics
    ///
    /// Panics if the runtime is not running.
    pub fn counter_with_strategy(name: &str, strategy: Strategy<f64>) -> Counter {
        current_runtime().counter_with_strategy(name, strategy)
    }

    /// Looks up or constructs a Logger.
    ///
    /// # Panics
    ///
    /// Panics if the runtime is not running.
    pub fn logger(name: &str) -> Logger {
        current_runtime().logger(name)
    }
}

fn current_runtime() -> Arc<Runtime> {
    RUNTIME
        .lock()
        .unwrap_or_else(|p| p.into_inner())
        .clone()
        .expect("telemetry runtime is not running; call Ttl::init first")
}

fn sink_from_uri(uri: &str) -> Result<Arc<dyn Sink>, ConfigError> {
    let (scheme, path) = uri.split_once("://").ok_or_else(|| ConfigError::MalformedUri { uri: uri.to_string() })?;
    match scheme {
        "file" => Ok(Arc::new(FileSink::open(path)?) as Arc<dyn Sink>),
        "stdout" => Ok(Arc::new(StdoutSink) as Arc<dyn Sink>),
        "discard" => Ok(Arc::new(DiscardSink) as Arc<dyn Sink>),
        other => Err(ConfigError::UnsupportedScheme { scheme: other.to_string() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // These tests share the process-wide runtime singleton, so they must
    // not run concurrently with each other; `cargo test` runs tests in a
    // crate's integration/unit suites in separate threads by default, which
    // is exactly the race this serializes against.
    static TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn malformed_uri_is_rejected() {
        let _guard = TEST_LOCK.lock().unwrap();
        let err = Ttl::init("not-a-uri").unwrap_err();
        assert!(matches!(err, InitError::Config(ConfigError::MalformedUri { .. })));
    }

    #[test]
    fn unknown_scheme_is_rejected() {
        let _guard = TEST_LOCK.lock().unwrap();
        let err = Ttl::init("carrier-pigeon://nowhere").unwrap_err();
        assert!(matches!(err, InitError::Config(ConfigError::UnsupportedScheme { .. })));
    }

    #[test]
    fn double_init_rejects_with_already_running() {
        let _guard = TEST_LOCK.lock().unwrap();
        Ttl::init("discard://").unwrap();
        let err = Ttl::init("discard://").unwrap_err();
        assert!(matches!(err, InitError::AlreadyRunning));
        Ttl::shutdown();
    }

    #[test]
    fn shutdown_without_init_is_a_no_op() {
        let _guard = TEST_LOCK.lock().unwrap();
        Ttl::shutdown();
        Ttl::shutdown();
    }

    #[test]
    fn init_is_legal_again_after_shutdown() {
        let _guard = TEST_LOCK.lock().unwrap();
        Ttl::init("discard://").unwrap();
        Ttl::shutdown();
        Ttl::init("discard://").unwrap();
        Ttl::shutdown();
    }
}

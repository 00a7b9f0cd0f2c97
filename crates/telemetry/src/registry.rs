//! Process-wide deduplicating map from name to telemetry object.
//!
//! Lookups take the fast path under a shared (read) lock; a miss escalates
//! to an exclusive (write) lock with a re-check, so two threads racing to
//! construct the same name never double-construct.

use crate::counter::{Counter, CounterInner};
use crate::logger::{Logger, LoggerInner};
use crate::telemetry_object::TelemetryObject;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use telemetry_core::{Config, Strategy};

impl Clone for TelemetryObject {
    fn clone(&self) -> Self {
        match self {
            TelemetryObject::Counter(c) => TelemetryObject::Counter(Arc::clone(c)),
            TelemetryObject::Logger(l) => TelemetryObject::Logger(Arc::clone(l)),
        }
    }
}

#[derive(Default)]
pub(crate) struct Registry {
    objects: RwLock<HashMap<String, TelemetryObject>>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self { objects: RwLock::default() }
    }

    /// Looks up or constructs the named Counter. Returns a handle sharing
    /// the registry's single underlying producer for this name.
    ///
    /// # Panics
    ///
    /// Panics if `name` is already registered as a Logger — telemetry
    /// object names are shared across types by construction, not by
    /// convention.
    pub(crate) fn get_or_make_counter(&self, name: &str, config: Config, strategy: Strategy<f64>) -> Counter {
        if let Some(existing) = self.objects.read().unwrap_or_else(|p| p.into_inner()).get(name) {
            return Self::expect_counter(name, existing);
        }

        let mut guard = self.objects.write().unwrap_or_else(|p| p.into_inner());
        if let Some(existing) = guard.get(name) {
            return Self::expect_counter(name, existing);
        }

        let inner = Arc::new(CounterInner::new(name.to_string(), config, strategy));
        guard.insert(name.to_string(), TelemetryObject::Counter(Arc::clone(&inner)));
        Counter::new(inner)
    }

    /// Looks up or constructs the named Logger.
    ///
    /// # Panics
    ///
    /// Panics if `name` is already registered as a Counter.
    pub(crate) fn get_or_make_logger(&self, name: &str) -> Logger {
        if let Some(existing) = self.objects.read().unwrap_or_else(|p| p.into_inner()).get(name) {
            return Self::expect_logger(name, existing);
        }

        let mut guard = self.objects.write().unwrap_or_else(|p| p.into_inner());
        if let Some(existing) = guard.get(name) {
            return Self::expect_logger(name, existing);
        }

        let inner = Arc::new(LoggerInner::new(name.to_string()));
        guard.insert(name.to_string(), TelemetryObject::Logger(Arc::clone(&inner)));
        Logger::new(inner)
    }

    /// Takes a stable snapshot of every registered object under the shared
    /// lock. The snapshot is independent of subsequent registry mutations.
    pub(crate) fn snapshot_objects(&self) -> Vec<TelemetryObject> {
        self.objects.read().unwrap_or_else(|p| p.into_inner()).values().cloned().collect()
    }

    fn expect_counter(name: &str, object: &TelemetryObject) -> Counter {
        match object {
            TelemetryObject::Counter(inner) => Counter::new(Arc::clone(inner)),
            TelemetryObject::Logger(_) => panic!("telemetry object \"{name}\" already registered as a Logger, not a Counter"),
        }
    }

    fn expect_logger(name: &str, object: &TelemetryObject) -> Logger {
        match object {
            TelemetryObject::Logger(inner) => Logger::new(Arc::clone(inner)),
            TelemetryObject::Counter(_) => panic!("telemetry object \"{name}\" already registered as a Counter, not a Logger"),
        }
    }
}

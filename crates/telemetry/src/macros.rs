//! Stream-style logging macros over the default `"logger"` telemetry
//! object, sugar over [`crate::Logger::log`] built on `format_args!` — the
//! Rust equivalent of the original's `LogStream` buffered `operator<<`
//! writes, without changing the Logger's wire behavior.

/// Logs a `Trace`-level message to the default logger.
#[macro_export]
macro_rules! ttl_trace {
    ($($arg:tt)*) => {
        $crate::Ttl::logger("logger").log($crate::LogLevel::Trace, format!($($arg)*))
    };
}

/// Logs a `Debug`-level message to the default logger.
#[macro_export]
macro_rules! ttl_debug {
    ($($arg:tt)*) => {
        $crate::Ttl::logger("logger").log($crate::LogLevel::Debug, format!($($arg)*))
    };
}

/// Logs an `Info`-level message to the default logger.
#[macro_export]
macro_rules! ttl_info {
    ($($arg:tt)*) => {
        $crate::Ttl::logger("logger").log($crate::LogLevel::Info, format!($($arg)*))
    };
}

/// Logs a `Warn`-level message to the default logger.
#[macro_export]
macro_rules! ttl_warn {
    ($($arg:tt)*) => {
        $crate::Ttl::logger("logger").log($crate::LogLevel::Warn, format!($($arg)*))
    };
}

/// Logs an `Error`-level message to the default logger.
#[macro_export]
macro_rules! ttl_error {
    ($($arg:tt)*) => {
        $crate::Ttl::logger("logger").log($crate::LogLevel::Error, format!($($arg)*))
    };
}

/// Logs a `Critical`-level message to the default logger.
#[macro_export]
macro_rules! ttl_critical {
    ($($arg:tt)*) => {
        $crate::Ttl::logger("logger").log($crate::LogLevel::Critical, format!($($arg)*))
    };
}

use thiserror::Error;

/// Errors surfaced to the caller of [`crate::Ttl::init`] / [`crate::Ttl::init_with_config`].
#[derive(Debug, Error)]
pub enum InitError {
    /// The runtime is already running; `init` is not idempotent.
    #[error("telemetry runtime is already running")]
    AlreadyRunning,

    /// The sink URI could not be parsed or constructed.
    #[error("invalid sink configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised while parsing a sink URI or constructing the sink it names.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed sink uri {uri:?}: missing \"://\" separator")]
    MalformedUri { uri: String },

    #[error("unsupported sink scheme {scheme:?}")]
    UnsupportedScheme { scheme: String },

    #[error("failed to open sink: {0}")]
    SinkConstruction(#[from] std::io::Error),
}

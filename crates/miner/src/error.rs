use thiserror::Error;

/// Errors raised while loading or validating a [`crate::conf::MinerConfig`].
///
/// Mining itself is infallible; only the configuration surface can fail.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

// Convenience type alias
pub type ConfigResult<T> = Result<T, ConfigError>;

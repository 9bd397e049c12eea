//! Error types for indicator configuration

use std::path::PathBuf;

use circular_animation::Easing;
use thiserror::Error;

/// Errors raised while validating, loading or saving an `IndicatorConfig`
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("duration must be a finite number of seconds >= 0.01, got {0}")]
    InvalidDuration(f64),

    #[error("invalid color: {0}")]
    InvalidColor(String),

    #[error("curve has non-finite control points: {0:?}")]
    InvalidCurve(Easing),

    #[error("failed to read config file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

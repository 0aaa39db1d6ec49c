//! Error types for Nimbus

use thiserror::Error;

/// The main error type for Nimbus operations
#[derive(Debug, Error)]
pub enum NimbusError {
    #[error("Unknown weather kind: {0}")]
    UnknownWeatherKind(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },
}

/// Result type alias for Nimbus operations
pub type Result<T> = std::result::Result<T, NimbusError>;

impl From<toml::de::Error> for NimbusError {
    fn from(err: toml::de::Error) -> Self {
        NimbusError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for NimbusError {
    fn from(err: toml::ser::Error) -> Self {
        NimbusError::TomlSerError(err.to_string())
    }
}

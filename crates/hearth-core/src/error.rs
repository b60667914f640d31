//! Error types for hearth-core

use thiserror::Error;

/// Result type alias using hearth-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for hearth
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file not found
    #[error("Configuration file not found: {path}. Run 'hearth config init' to create one")]
    ConfigNotFound { path: String },

    /// Required settings missing or invalid
    #[error("Invalid configuration: {message}")]
    Configuration { message: String },

    /// Unknown configuration key
    #[error("'{key}' is not a valid config key. Valid keys: {valid}")]
    UnknownKey { key: String, valid: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// Template rendering error
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a config not found error
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an unknown key error
    pub fn unknown_key(key: impl Into<String>) -> Self {
        Self::UnknownKey {
            key: key.into(),
            valid: crate::config::CONFIG_KEYS.join(", "),
        }
    }
}

//! Error types for spawnkit-core

use thiserror::Error;

/// Result type alias using spawnkit-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for spawnkit
#[derive(Error, Debug)]
pub enum Error {
    /// Required environment variable is not set
    #[error("{name} is not defined in {mode} mode.")]
    MissingEnv { name: String, mode: String },

    /// Invalid configuration value
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Unknown tone name
    #[error("Unknown tone: {name}. Valid tones: default, genz, shakespeare")]
    UnknownTone { name: String },

    /// Invalid semver version
    #[error("Invalid version format: {version}")]
    InvalidVersion { version: String },

    /// Non-success HTTP status
    #[error("Request to {url} failed with status {status}")]
    HttpStatus { url: String, status: u16 },

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl Error {
    /// Create a missing environment variable error
    pub fn missing_env(name: impl Into<String>, mode: impl Into<String>) -> Self {
        Self::MissingEnv {
            name: name.into(),
            mode: mode.into(),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an unknown tone error
    pub fn unknown_tone(name: impl Into<String>) -> Self {
        Self::UnknownTone { name: name.into() }
    }

    /// Create an invalid version error
    pub fn invalid_version(version: impl Into<String>) -> Self {
        Self::InvalidVersion {
            version: version.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }
}

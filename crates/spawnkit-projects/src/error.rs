//! Error types for spawnkit-projects

use thiserror::Error;

/// Result type alias using spawnkit-projects's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Scaffolding error types
#[derive(Error, Debug)]
pub enum Error {
    /// Local choices file does not exist
    #[error("Local choices file not found: {path}")]
    ChoicesFileNotFound { path: String },

    /// Remote choices endpoint returned a non-success status
    #[error("Failed to fetch: {status}")]
    ChoicesHttpStatus { status: u16 },

    /// One or more choice entries failed validation
    #[error("Choices validation failed:\n{}", .errors.join("\n"))]
    ChoicesValidation { errors: Vec<String> },

    /// The embedded preset schema could not be compiled
    #[error("Preset schema error: {message}")]
    ChoicesSchema { message: String },

    /// The choice source produced an empty list
    #[error("No presets are available")]
    NoChoices,

    /// Preset argument did not match any choice
    #[error("Preset not found: {preset}")]
    UnknownPreset { preset: String },

    /// Project name can never be used as a target directory
    #[error("Invalid project target: {message}")]
    InvalidTarget { message: String },

    /// Repository URL cannot be downloaded as a snapshot
    #[error("Invalid repository URL: {url}")]
    InvalidRepoUrl { url: String },

    /// Download destination already has content
    #[error("Target directory is not empty: {path}")]
    TargetNotEmpty { path: String },

    /// Template snapshot download or extraction failed
    #[error("Failed to fetch template: {message}")]
    FetchFailed { message: String },

    /// Package manager install failed
    #[error("Dependency installation failed: {message}")]
    InstallFailed { message: String },

    /// Terminal prompt could not be shown
    #[error("Prompt failed: {message}")]
    Prompt { message: String },

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Core library error
    #[error("Core error: {0}")]
    Core(#[from] spawnkit_core::Error),
}

impl Error {
    /// Create a choices file not found error
    pub fn choices_file_not_found(path: impl Into<String>) -> Self {
        Self::ChoicesFileNotFound { path: path.into() }
    }

    /// Create a choices HTTP status error
    pub fn choices_http_status(status: u16) -> Self {
        Self::ChoicesHttpStatus { status }
    }

    /// Create an aggregated validation error
    pub fn choices_validation(errors: Vec<String>) -> Self {
        Self::ChoicesValidation { errors }
    }

    /// Create a preset schema error
    pub fn choices_schema(message: impl Into<String>) -> Self {
        Self::ChoicesSchema {
            message: message.into(),
        }
    }

    /// Create an unknown preset error
    pub fn unknown_preset(preset: impl Into<String>) -> Self {
        Self::UnknownPreset {
            preset: preset.into(),
        }
    }

    /// Create an invalid target error
    pub fn invalid_target(message: impl Into<String>) -> Self {
        Self::InvalidTarget {
            message: message.into(),
        }
    }

    /// Create an invalid repo URL error
    pub fn invalid_repo_url(url: impl Into<String>) -> Self {
        Self::InvalidRepoUrl { url: url.into() }
    }

    /// Create a target not empty error
    pub fn target_not_empty(path: impl Into<String>) -> Self {
        Self::TargetNotEmpty { path: path.into() }
    }

    /// Create a fetch failed error
    pub fn fetch_failed(message: impl Into<String>) -> Self {
        Self::FetchFailed {
            message: message.into(),
        }
    }

    /// Create an install failed error
    pub fn install_failed(message: impl Into<String>) -> Self {
        Self::InstallFailed {
            message: message.into(),
        }
    }

    /// Create a prompt error
    pub fn prompt(message: impl Into<String>) -> Self {
        Self::Prompt {
            message: message.into(),
        }
    }
}

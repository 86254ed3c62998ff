//! Runtime configuration resolved from environment variables
//!
//! Precedence (low to high):
//! 1. Built-in defaults
//! 2. Environment variables (`SPAWNKIT_*`, `CHOICES_API_URL`)
//! 3. CLI flags (applied by the caller through the `with_*` setters)

use crate::error::{Error, Result};
use std::env;
use std::fmt;

/// Selects development (embedded choices) or production (remote API)
pub const ENV_MODE: &str = "SPAWNKIT_ENV";

/// Remote choices endpoint, required in production mode
pub const ENV_CHOICES_API_URL: &str = "CHOICES_API_URL";

/// Explicit choice source (local path or URL), overrides the mode
pub const ENV_CHOICES: &str = "SPAWNKIT_CHOICES";

/// Base URL for repository snapshot downloads
pub const ENV_CODELOAD_URL: &str = "SPAWNKIT_CODELOAD_URL";

/// Latest-release endpoint used by the update notice
pub const ENV_RELEASES_URL: &str = "SPAWNKIT_RELEASES_URL";

/// Any non-empty value other than `0`/`false` disables the update notice
pub const ENV_NO_UPDATE_CHECK: &str = "SPAWNKIT_NO_UPDATE_CHECK";

pub const DEFAULT_CODELOAD_URL: &str = "https://codeload.github.com";
pub const DEFAULT_RELEASES_URL: &str =
    "https://api.github.com/repos/spawnkit/spawnkit/releases/latest";

/// Execution mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    Development,
    #[default]
    Production,
}

impl Mode {
    /// Parse the value of `SPAWNKIT_ENV`. Unknown or missing values mean production.
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) if v == "dev" || v == "development" => Mode::Development,
            _ => Mode::Production,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Development => "development",
            Mode::Production => "production",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the preset list comes from, before any I/O happens
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoiceOrigin {
    /// The choices compiled into the binary
    Embedded,
    /// A local path or an http(s) URL
    Location(String),
}

/// Resolved runtime configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub mode: Mode,
    pub choices_api_url: Option<String>,
    pub choices_override: Option<String>,
    pub codeload_url: String,
    pub releases_url: String,
    pub update_check: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            choices_api_url: None,
            choices_override: None,
            codeload_url: DEFAULT_CODELOAD_URL.to_string(),
            releases_url: DEFAULT_RELEASES_URL.to_string(),
            update_check: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            mode: Mode::from_env_value(lookup(ENV_MODE).as_deref()),
            choices_api_url: non_empty(ENV_CHOICES_API_URL),
            choices_override: non_empty(ENV_CHOICES),
            codeload_url: non_empty(ENV_CODELOAD_URL).unwrap_or(defaults.codeload_url),
            releases_url: non_empty(ENV_RELEASES_URL).unwrap_or(defaults.releases_url),
            update_check: !non_empty(ENV_NO_UPDATE_CHECK).is_some_and(|v| is_truthy(&v)),
        }
    }

    /// Override the choice source (CLI `--choices`)
    pub fn with_choices_override(mut self, source: Option<String>) -> Self {
        if source.is_some() {
            self.choices_override = source;
        }
        self
    }

    /// Disable the update notice (CLI `--no-update-check`)
    pub fn without_update_check(mut self) -> Self {
        self.update_check = false;
        self
    }

    /// Decide where choices are loaded from
    ///
    /// An explicit override wins. Development mode uses the embedded list;
    /// production mode requires `CHOICES_API_URL`.
    pub fn choice_origin(&self) -> Result<ChoiceOrigin> {
        if let Some(source) = &self.choices_override {
            return Ok(ChoiceOrigin::Location(source.clone()));
        }

        match self.mode {
            Mode::Development => Ok(ChoiceOrigin::Embedded),
            Mode::Production => self
                .choices_api_url
                .clone()
                .map(ChoiceOrigin::Location)
                .ok_or_else(|| Error::missing_env(ENV_CHOICES_API_URL, self.mode.as_str())),
        }
    }

    /// Reject endpoint settings that are not http(s) URLs
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            (ENV_CODELOAD_URL, &self.codeload_url),
            (ENV_RELEASES_URL, &self.releases_url),
        ] {
            if !is_http_url(value) {
                return Err(Error::invalid_config(format!(
                    "{} must be an http(s) URL, got {:?}",
                    name, value
                )));
            }
        }

        if let Some(api) = &self.choices_api_url {
            if !is_http_url(api) {
                return Err(Error::invalid_config(format!(
                    "{} must be an http(s) URL, got {:?}",
                    ENV_CHOICES_API_URL, api
                )));
            }
        }

        Ok(())
    }
}

fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

fn is_truthy(value: &str) -> bool {
    !matches!(value.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no")
}

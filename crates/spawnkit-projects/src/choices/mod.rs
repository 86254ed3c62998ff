//! Preset choice loading
//!
//! Choices come from exactly one origin:
//! - in-memory records (the list embedded in the binary for development)
//! - a local JSON file, resolved against the loader's base directory
//! - a remote `http(s)://` endpoint returning a JSON array
//!
//! Every origin goes through the same pipeline: deserialize into raw records,
//! normalize the `after` field, then validate strictly. A single bad entry
//! fails the whole load with every entry's issues listed.

pub mod normalize;
pub mod validate;

pub use normalize::{normalize_record, normalize_records};
pub use validate::{validate_choices, ChoiceValidator, FieldIssue};

use crate::error::{Error, Result};
use crate::types::PresetChoice;
use camino::Utf8PathBuf;
use serde_json::Value;
use spawnkit_core::{http, ChoiceOrigin};
use tracing::{debug, info};

/// Choices shipped with the binary, used in development mode
const EMBEDDED_CHOICES: &str = include_str!("../../../../embedded/choices.json");

/// Where to load raw choice records from
#[derive(Debug, Clone, PartialEq)]
pub enum ChoiceSource {
    /// Records already in memory
    Records(Vec<Value>),
    /// Local file path (relative to the loader's base directory)
    File(String),
    /// Remote endpoint
    Url(String),
}

impl ChoiceSource {
    /// Classify a string as a remote URL or a local path
    pub fn parse(source: impl Into<String>) -> Self {
        let source = source.into();
        if is_remote(&source) {
            ChoiceSource::Url(source)
        } else {
            ChoiceSource::File(source)
        }
    }

    /// The records compiled into the binary
    pub fn embedded() -> Result<Self> {
        let records: Vec<Value> = serde_json::from_str(EMBEDDED_CHOICES)?;
        Ok(ChoiceSource::Records(records))
    }

    /// Build the source selected by the runtime configuration
    pub fn from_origin(origin: ChoiceOrigin) -> Result<Self> {
        match origin {
            ChoiceOrigin::Embedded => Self::embedded(),
            ChoiceOrigin::Location(location) => Ok(Self::parse(location)),
        }
    }
}

/// True for strings starting with `http://` or `https://`
pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Loads and validates choices from a [`ChoiceSource`]
pub struct ChoiceLoader {
    client: reqwest::Client,
    base_dir: Utf8PathBuf,
}

impl ChoiceLoader {
    /// Create a loader resolving local paths against `base_dir`
    pub fn new(base_dir: impl Into<Utf8PathBuf>) -> Result<Self> {
        Ok(Self {
            client: http::client()?,
            base_dir: base_dir.into(),
        })
    }

    /// Load, normalize and validate choices
    pub async fn load(&self, source: ChoiceSource) -> Result<Vec<PresetChoice>> {
        let records = match source {
            ChoiceSource::Records(records) => records,
            ChoiceSource::File(path) => self.read_local(&path).await?,
            ChoiceSource::Url(url) => self.fetch_remote(&url).await?,
        };

        debug!("Loaded {} raw choice records", records.len());

        let normalized = normalize_records(records);
        let choices = validate_choices(&normalized)?;

        info!("Validated {} preset choices", choices.len());
        Ok(choices)
    }

    async fn read_local(&self, path: &str) -> Result<Vec<Value>> {
        let resolved = self.base_dir.join(path);
        debug!("Reading choices from: {}", resolved);

        if !resolved.is_file() {
            return Err(Error::choices_file_not_found(resolved.as_str()));
        }

        let content = tokio::fs::read_to_string(&resolved).await?;
        Ok(serde_json::from_str(&content)?)
    }

    async fn fetch_remote(&self, url: &str) -> Result<Vec<Value>> {
        debug!("Fetching choices from: {}", url);

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::choices_http_status(status.as_u16()));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

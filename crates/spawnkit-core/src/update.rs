//! Release checks for the "new version available" notice

use crate::error::{Error, Result};
use crate::http;
use semver::Version;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Upper bound for the release lookup; the notice must never slow a run down
const CHECK_TIMEOUT: Duration = Duration::from_secs(3);

/// Subset of the GitHub release payload
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    /// Release tag (e.g., "v0.4.0")
    pub tag_name: String,
}

/// Compares the running version against the latest published release
pub struct UpdateChecker {
    client: reqwest::Client,
    url: String,
}

impl UpdateChecker {
    /// Create a checker against a latest-release endpoint
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: http::client_with_timeout(CHECK_TIMEOUT)?,
            url: url.into(),
        })
    }

    /// Fetch the latest published version
    pub async fn latest_version(&self) -> Result<Version> {
        debug!("Fetching latest release from: {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::http_status(&self.url, response.status().as_u16()));
        }

        let release: Release = response.json().await?;
        parse_tag(&release.tag_name)
    }

    /// Return the newer version if one is published
    pub async fn check(&self, current_version: &str) -> Result<Option<Version>> {
        let current = parse_tag(current_version)?;
        let latest = self.latest_version().await?;

        if latest > current {
            debug!("Update available: {} -> {}", current, latest);
            Ok(Some(latest))
        } else {
            debug!("Already on latest version: {}", current);
            Ok(None)
        }
    }
}

/// Parse a tag such as `v1.2.3` or `1.2.3`
pub fn parse_tag(tag: &str) -> Result<Version> {
    let trimmed = tag.trim();
    let raw = trimmed.strip_prefix('v').unwrap_or(trimmed);
    Version::parse(raw).map_err(|_| Error::invalid_version(tag))
}

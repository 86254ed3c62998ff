//! Shared HTTP client construction

use crate::error::Result;
use crate::VERSION;
use std::time::Duration;

/// User agent sent with every request
pub fn user_agent() -> String {
    format!("spawnkit/{} (https://github.com/spawnkit/spawnkit)", VERSION)
}

/// Build an HTTP client with the spawnkit user agent
pub fn client() -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder().user_agent(user_agent()).build()?)
}

/// Build an HTTP client that gives up after `timeout`
pub fn client_with_timeout(timeout: Duration) -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .user_agent(user_agent())
        .timeout(timeout)
        .build()?)
}

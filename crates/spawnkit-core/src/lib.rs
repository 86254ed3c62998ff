//! # spawnkit-core
//!
//! Core library for the spawnkit CLI providing:
//! - Runtime configuration resolved from environment variables
//! - Tone tables for every user-facing string
//! - Release checks used to notify about outdated installs
//! - A shared HTTP client builder

pub mod config;
pub mod error;
pub mod http;
pub mod tone;
pub mod update;

pub use config::{AppConfig, ChoiceOrigin, Mode};
pub use error::{Error, Result};
pub use tone::{Tone, ToneText};
pub use update::UpdateChecker;

/// Current CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

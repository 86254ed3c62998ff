//! # spawnkit-projects
//!
//! Project scaffolding for spawnkit:
//! - Preset choice loading, normalization and validation
//! - Project target resolution with folder-conflict handling
//! - Template snapshot download and dependency install
//! - The scaffold workflow tying them together behind prompt ports

pub mod choices;
pub mod error;
pub mod fetch;
pub mod install;
pub mod prompt;
pub mod scaffold;
pub mod target;
pub mod types;

pub use choices::{ChoiceLoader, ChoiceSource};
pub use error::{Error, Result};
pub use fetch::{RepoSpec, SnapshotFetcher, TemplateFetcher};
pub use install::{CommandInstaller, DependencyInstaller, PackageManager};
pub use prompt::{ConflictAction, Event, Prompt, RecordingReporter, Reporter, ScriptedPrompt};
pub use scaffold::{Outcome, ScaffoldRequest, Scaffolder, Summary, DEFAULT_PROJECT_NAME};
pub use target::{slugify, ProjectTarget, Resolution, TargetResolver};
pub use types::{find_preset, PresetChoice};

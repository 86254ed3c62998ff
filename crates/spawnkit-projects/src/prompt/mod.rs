//! Ports for user interaction
//!
//! The resolver and the scaffold workflow never talk to a terminal directly.
//! They ask a [`Prompt`] for answers and tell a [`Reporter`] what happened.
//! An answer of `Ok(None)` means the user aborted the prompt and is handled
//! exactly like choosing "cancel".

pub mod scripted;

pub use scripted::{RecordingReporter, ScriptedPrompt};

use crate::error::Result;
use crate::types::PresetChoice;

/// Resolution options offered for a non-empty target directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictAction {
    /// Delete the existing directory and reuse the name
    Override,
    /// Ask for another name and resolve again
    Rename,
    /// Stop without touching anything
    Cancel,
}

impl ConflictAction {
    /// Menu order
    pub const ALL: [ConflictAction; 3] = [
        ConflictAction::Override,
        ConflictAction::Rename,
        ConflictAction::Cancel,
    ];
}

/// Interactive questions asked during a run
pub trait Prompt {
    /// Pick one preset, returning its index in `choices`
    fn select_preset(&self, choices: &[PresetChoice]) -> Result<Option<usize>>;

    /// Ask for the project name; implementations re-ask until it is non-blank
    fn input_project_name(&self, initial: &str) -> Result<Option<String>>;

    /// Ask what to do with the existing non-empty directory `slug`
    fn select_conflict_action(&self, slug: &str) -> Result<Option<ConflictAction>>;

    /// Ask for a replacement name; implementations re-ask until it is non-blank
    fn input_new_name(&self) -> Result<Option<String>>;
}

/// Progress notifications emitted by the resolver and the workflow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    FolderExists { slug: String },
    FolderDeleted { slug: String },
    Creating { project: String },
    FetchStarted { repo: String },
    FetchSucceeded,
    FetchFailed,
    InstallStarted { manager: String },
    InstallSucceeded,
    InstallFailed,
    InstallSkipped,
}

/// Receives [`Event`]s
pub trait Reporter {
    fn report(&self, event: Event);
}

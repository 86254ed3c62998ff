//! Project target resolution
//!
//! Turns a typed project name into a directory under the base directory and
//! settles any clash with an existing, non-empty directory through the
//! [`Prompt`] port. The outcome is a [`Resolution`]; nothing here exits the
//! process.

pub mod slug;

pub use slug::{is_forbidden, slugify};

use crate::error::Result;
use crate::prompt::{ConflictAction, Event, Prompt, Reporter};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tracing::{debug, info, warn};

/// Rename attempts allowed before giving up
pub const DEFAULT_MAX_ATTEMPTS: usize = 32;

/// A directory-safe project location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectTarget {
    requested_name: String,
    slug: String,
    path: Utf8PathBuf,
}

impl ProjectTarget {
    /// The name as the user typed it
    pub fn requested_name(&self) -> &str {
        &self.requested_name
    }

    /// The directory name actually used
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Absolute directory path
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

/// Result of resolving a project name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Safe to create and fill
    Resolved(ProjectTarget),
    /// The user cancelled; no changes were made
    Cancelled,
    /// The name can never be used
    Fatal(String),
}

/// What is currently at a target path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetState {
    Missing,
    Empty,
    Occupied,
}

/// Inspect a target path without modifying it
pub fn inspect(path: &Utf8Path) -> Result<TargetState> {
    if !path.exists() {
        return Ok(TargetState::Missing);
    }

    if !path.is_dir() {
        return Ok(TargetState::Occupied);
    }

    let mut entries = fs::read_dir(path)?;
    if entries.next().is_some() {
        Ok(TargetState::Occupied)
    } else {
        Ok(TargetState::Empty)
    }
}

/// Resolves project names against a base directory
#[derive(Debug, Clone)]
pub struct TargetResolver {
    base_dir: Utf8PathBuf,
    max_attempts: usize,
}

impl TargetResolver {
    /// Create a resolver rooted at `base_dir` (usually the working directory)
    pub fn new(base_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Limit how many times the user may rename before the resolver gives up
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Resolve `name`, asking the user about conflicts
    ///
    /// - forbidden slug: [`Resolution::Fatal`], the filesystem is not touched
    /// - missing or empty directory: [`Resolution::Resolved`] without prompting
    /// - non-empty directory: override (delete), rename (resolve again) or cancel
    pub fn resolve(
        &self,
        name: &str,
        prompt: &dyn Prompt,
        reporter: &dyn Reporter,
    ) -> Result<Resolution> {
        let mut requested = name.to_string();
        let mut renames = 0;

        loop {
            let slug = slugify(&requested);
            debug!("Resolving project name {:?} -> {:?} (renames {})", requested, slug, renames);

            if is_forbidden(&slug) {
                return Ok(Resolution::Fatal(format!(
                    "Project name {:?} does not produce a usable folder name",
                    requested
                )));
            }

            let path = self.base_dir.join(&slug);
            let target = ProjectTarget {
                requested_name: requested.clone(),
                slug: slug.clone(),
                path: path.clone(),
            };

            match inspect(&path)? {
                TargetState::Missing | TargetState::Empty => {
                    return Ok(Resolution::Resolved(target));
                }
                TargetState::Occupied => {
                    reporter.report(Event::FolderExists { slug: slug.clone() });
                }
            }

            match prompt.select_conflict_action(&slug)? {
                Some(ConflictAction::Override) => {
                    remove_target(&path)?;
                    info!("Removed existing target: {}", path);
                    reporter.report(Event::FolderDeleted { slug });
                    return Ok(Resolution::Resolved(target));
                }
                Some(ConflictAction::Rename) if renames >= self.max_attempts => {
                    warn!("Gave up after {} rename attempts", renames);
                    return Ok(Resolution::Fatal(format!(
                        "Still no free folder after {} renames",
                        renames
                    )));
                }
                Some(ConflictAction::Rename) => match ask_new_name(prompt)? {
                    Some(new_name) => {
                        renames += 1;
                        requested = new_name;
                    }
                    None => return Ok(Resolution::Cancelled),
                },
                Some(ConflictAction::Cancel) | None => return Ok(Resolution::Cancelled),
            }
        }
    }
}

/// Ask for a new name until a non-blank one is given or the user aborts
fn ask_new_name(prompt: &dyn Prompt) -> Result<Option<String>> {
    loop {
        match prompt.input_new_name()? {
            Some(name) if name.trim().is_empty() => continue,
            other => return Ok(other),
        }
    }
}

fn remove_target(path: &Utf8Path) -> Result<()> {
    if path.is_dir() {
        fs::remove_dir_all(path)?;
    } else {
        fs::remove_file(path)?;
    }
    Ok(())
}

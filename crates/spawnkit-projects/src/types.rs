//! Validated preset definitions

use serde::Serialize;

/// One starter kit offered to the user
///
/// Only constructed by [`crate::choices::validate_choices`], so every value
/// has a non-empty title and preset and a GitHub repository URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresetChoice {
    title: String,
    preset: String,
    repo: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    after: Vec<String>,
}

impl PresetChoice {
    pub(crate) fn new(title: String, preset: String, repo: String, after: Vec<String>) -> Self {
        Self {
            title,
            preset,
            repo,
            after,
        }
    }

    /// Display title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Selection key, also matched against the positional CLI argument
    pub fn preset(&self) -> &str {
        &self.preset
    }

    /// Source repository URL
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Commands suggested after setup, empty when the preset has none
    pub fn after(&self) -> &[String] {
        &self.after
    }

    /// Lines printed once the project is ready: `cd <project>` then the after-commands
    pub fn announcement(&self, project_name: &str) -> Vec<String> {
        std::iter::once(format!("cd {}", project_name))
            .chain(self.after.iter().cloned())
            .collect()
    }
}

/// Find a preset by its slug; the first match wins
pub fn find_preset<'a>(choices: &'a [PresetChoice], preset: &str) -> Option<&'a PresetChoice> {
    choices.iter().find(|c| c.preset == preset)
}

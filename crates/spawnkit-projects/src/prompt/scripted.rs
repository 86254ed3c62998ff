//! Non-interactive [`Prompt`] and [`Reporter`] implementations
//!
//! Used by tests and by unattended runs where every answer is known upfront.

use super::{ConflictAction, Event, Prompt, Reporter};
use crate::error::{Error, Result};
use crate::types::PresetChoice;
use std::cell::RefCell;
use std::collections::VecDeque;

/// Answers prompts from pre-recorded queues
///
/// `None` entries simulate the user aborting that prompt. Asking a question
/// whose queue is empty is an error, so tests fail loudly on unexpected prompts.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    presets: RefCell<VecDeque<Option<String>>>,
    project_names: RefCell<VecDeque<Option<String>>>,
    conflict_actions: RefCell<VecDeque<Option<ConflictAction>>>,
    new_names: RefCell<VecDeque<Option<String>>>,
    asked: RefCell<Vec<&'static str>>,
}

impl ScriptedPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer the next preset prompt with the preset slug `preset`
    pub fn with_preset(self, preset: &str) -> Self {
        self.presets.borrow_mut().push_back(Some(preset.to_string()));
        self
    }

    /// Answer the next project-name prompt
    pub fn with_project_name(self, name: &str) -> Self {
        self.project_names
            .borrow_mut()
            .push_back(Some(name.to_string()));
        self
    }

    /// Answer the next conflict menu
    pub fn with_conflict_action(self, action: ConflictAction) -> Self {
        self.conflict_actions.borrow_mut().push_back(Some(action));
        self
    }

    /// Answer the next rename prompt
    pub fn with_new_name(self, name: &str) -> Self {
        self.new_names.borrow_mut().push_back(Some(name.to_string()));
        self
    }

    /// Abort the next preset prompt
    pub fn aborting_preset(self) -> Self {
        self.presets.borrow_mut().push_back(None);
        self
    }

    /// Abort the next project-name prompt
    pub fn aborting_project_name(self) -> Self {
        self.project_names.borrow_mut().push_back(None);
        self
    }

    /// Abort the next conflict menu
    pub fn aborting_conflict(self) -> Self {
        self.conflict_actions.borrow_mut().push_back(None);
        self
    }

    /// Names of the prompts asked so far, in order
    pub fn asked(&self) -> Vec<&'static str> {
        self.asked.borrow().clone()
    }

    fn next<T>(&self, name: &'static str, queue: &RefCell<VecDeque<Option<T>>>) -> Result<Option<T>> {
        self.asked.borrow_mut().push(name);
        queue
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| Error::prompt(format!("no scripted answer for {}", name)))
    }
}

impl Prompt for ScriptedPrompt {
    fn select_preset(&self, choices: &[PresetChoice]) -> Result<Option<usize>> {
        match self.next("preset", &self.presets)? {
            None => Ok(None),
            Some(preset) => choices
                .iter()
                .position(|c| c.preset() == preset)
                .map(Some)
                .ok_or_else(|| Error::prompt(format!("scripted preset {} is not offered", preset))),
        }
    }

    fn input_project_name(&self, _initial: &str) -> Result<Option<String>> {
        self.next("project_name", &self.project_names)
    }

    fn select_conflict_action(&self, _slug: &str) -> Result<Option<ConflictAction>> {
        self.next("conflict", &self.conflict_actions)
    }

    fn input_new_name(&self) -> Result<Option<String>> {
        self.next("rename", &self.new_names)
    }
}

/// Collects every reported [`Event`]
#[derive(Debug, Default)]
pub struct RecordingReporter {
    events: RefCell<Vec<Event>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, event: Event) {
        self.events.borrow_mut().push(event);
    }
}

//! Interactive prompts backed by dialoguer

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use spawnkit_core::{Tone, ToneText};
use spawnkit_projects::prompt::{ConflictAction, Prompt};
use spawnkit_projects::{Error, PresetChoice, Result};
use std::io;

/// Asks questions on the terminal using the selected tone's wording
pub struct DialoguerPrompt {
    text: &'static ToneText,
    theme: ColorfulTheme,
}

impl DialoguerPrompt {
    pub fn new(text: &'static ToneText) -> Self {
        Self {
            text,
            theme: ColorfulTheme::default(),
        }
    }

    fn conflict_label(&self, action: ConflictAction) -> &'static str {
        match action {
            ConflictAction::Override => self.text.folder_delete,
            ConflictAction::Rename => self.text.rename_prompt,
            ConflictAction::Cancel => self.text.cancel,
        }
    }

    fn required_text(
        &self,
        message: &str,
        initial: Option<&str>,
        error: &'static str,
    ) -> Result<Option<String>> {
        let mut input = Input::<String>::with_theme(&self.theme).with_prompt(message);
        if let Some(initial) = initial {
            input = input.default(initial.to_string());
        }

        let answer = input
            .validate_with(move |value: &String| -> std::result::Result<(), &'static str> {
                if value.trim().is_empty() {
                    Err(error)
                } else {
                    Ok(())
                }
            })
            .interact_text();

        Ok(aborted_as_none(answer)?.map(|value| value.trim().to_string()))
    }
}

impl Prompt for DialoguerPrompt {
    fn select_preset(&self, choices: &[PresetChoice]) -> Result<Option<usize>> {
        let items: Vec<String> = choices
            .iter()
            .map(|c| format!("{} ({})", c.title(), c.preset()))
            .collect();

        let selection = Select::with_theme(&self.theme)
            .with_prompt(self.text.prompt_preset)
            .items(&items)
            .default(0)
            .interact_opt();

        Ok(aborted_as_none(selection)?.flatten())
    }

    fn input_project_name(&self, initial: &str) -> Result<Option<String>> {
        self.required_text(
            self.text.prompt_project_name,
            Some(initial),
            self.text.prompt_project_name_error,
        )
    }

    fn select_conflict_action(&self, slug: &str) -> Result<Option<ConflictAction>> {
        let items: Vec<&str> = ConflictAction::ALL
            .iter()
            .map(|action| self.conflict_label(*action))
            .collect();

        let selection = Select::with_theme(&self.theme)
            .with_prompt(format!("{} ({})", self.text.folder_not_empty, slug))
            .items(&items)
            .default(0)
            .interact_opt();

        Ok(aborted_as_none(selection)?
            .flatten()
            .and_then(|index| ConflictAction::ALL.get(index).copied()))
    }

    fn input_new_name(&self) -> Result<Option<String>> {
        self.required_text(self.text.rename_prompt, None, self.text.rename_error)
    }
}

/// Ask for the wording style
pub fn select_tone() -> Result<Option<Tone>> {
    let items: Vec<&str> = Tone::ALL.iter().map(|tone| tone.label()).collect();

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(Tone::Default.text().prompt_tone)
        .items(&items)
        .default(0)
        .interact_opt();

    Ok(aborted_as_none(selection)?
        .flatten()
        .and_then(|index| Tone::ALL.get(index).copied()))
}

/// Ctrl-C surfaces as an interrupted read; treat it like Esc
fn aborted_as_none<T>(result: dialoguer::Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(dialoguer::Error::IO(e)) if e.kind() == io::ErrorKind::Interrupted => Ok(None),
        Err(e) => Err(Error::prompt(e.to_string())),
    }
}

//! Tone tables for user-facing text
//!
//! Every message the CLI prints comes from a [`ToneText`] table. The table is
//! picked once from a [`Tone`] and handed to each presentation call.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Wording style selected by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Default,
    GenZ,
    Shakespeare,
}

/// The strings printed for one tone
#[derive(Debug)]
pub struct ToneText {
    pub wait: &'static str,
    pub cooking: &'static str,
    pub template_ok: &'static str,
    pub template_fail: &'static str,
    pub install_start: &'static str,
    pub install_ok: &'static str,
    pub install_fail: &'static str,
    pub install_skipped: &'static str,
    pub done: &'static str,
    pub fetching: &'static str,
    pub fetching_fail: &'static str,
    pub preset_missing: &'static str,
    pub update_available: &'static str,

    // Prompts
    pub prompt_tone: &'static str,
    pub prompt_preset: &'static str,
    pub prompt_project_name: &'static str,
    pub prompt_project_name_error: &'static str,

    // Folder conflicts
    pub folder_exists: &'static str,
    pub folder_not_empty: &'static str,
    pub folder_invalid: &'static str,
    pub folder_delete: &'static str,
    pub folder_delete_done: &'static str,
    pub rename_prompt: &'static str,
    pub rename_error: &'static str,
    pub cancel: &'static str,
}

static DEFAULT_TEXT: ToneText = ToneText {
    wait: "Please wait..",
    cooking: "Creating your project",
    template_ok: "Template downloaded successfully!",
    template_fail: "Template download failed.",
    install_start: "Installing dependencies",
    install_ok: "Dependencies installed successfully!",
    install_fail: "Failed to install dependencies.",
    install_skipped: "Skipped dependency installation.",
    done: "Setup complete!",
    fetching: "Fetching template..",
    fetching_fail: "Failed to load template list.",
    preset_missing: "Preset not found.",
    update_available: "A new version of spawnkit is available",

    prompt_tone: "Choose your language style:",
    prompt_preset: "Choose your project setup:",
    prompt_project_name: "Enter a name for your project folder:",
    prompt_project_name_error: "Project name is required.",

    folder_exists: "The folder already exists.",
    folder_not_empty: "Folder is not empty.",
    folder_invalid: "Project name cannot point at the current folder.",
    folder_delete: "Override it (delete folder)",
    folder_delete_done: "Deleted folder",
    rename_prompt: "Enter a new project name:",
    rename_error: "Project name cannot be empty.",
    cancel: "Setup cancelled.",
};

static GENZ_TEXT: ToneText = ToneText {
    wait: "One sec, it's cooking 🔥",
    cooking: "Whipping up your project, no cap",
    template_ok: "Template just landed clean, sheesh",
    template_fail: "Template ate the fattest L rip",
    install_start: "Grabbing deps",
    install_ok: "Deps locked in, we eatin",
    install_fail: "Install crashed out, actual pain",
    install_skipped: "Skipped the deps, living dangerously",
    done: "All done king, go touch grass or code",
    fetching: "Pulling templates real quick",
    fetching_fail: "Templates ghosted us deadass",
    preset_missing: "That preset ain't real bro",
    update_available: "New spawnkit just dropped fr",

    prompt_tone: "What vibe we on today:",
    prompt_preset: "What we building gang?",
    prompt_project_name: "Drop a fire project name:",
    prompt_project_name_error: "Nah fam you gotta type something",

    folder_exists: "Folder already chilling here",
    folder_not_empty: "Folder got stuff in it my guy",
    folder_invalid: "That name is literally this folder bro",
    folder_delete: "Yeet the whole folder?",
    folder_delete_done: "Folder got sent to the shadow realm",
    rename_prompt: "Hit me with a new name:",
    rename_error: "Bro put SOMETHING I'm begging",
    cancel: "Aight bet, we out",
};

static SHAKESPEARE_TEXT: ToneText = ToneText {
    wait: "Pray, tarry a moment...",
    cooking: "I conjure thy project from the ether!",
    template_ok: "The template hath arrived in triumph!",
    template_fail: "Alas, the template hath miserably failed.",
    install_start: "Summoning dependencies from distant realms",
    install_ok: "The packages have been graciously installed!",
    install_fail: "Woe! The installation hath been struck down!",
    install_skipped: "The packages remain unsummoned, as thou didst bid.",
    done: "Thy project is complete, get thee to thy editor!",
    fetching: "Fetching the sacred templates...",
    fetching_fail: "The templates are lost unto the void.",
    preset_missing: "No such preset exists in these lands.",
    update_available: "A newer spawnkit doth await thee",

    prompt_tone: "In what tongue shall we speak, good soul?",
    prompt_preset: "What manner of project dost thou seek?",
    prompt_project_name: "Bestow a worthy name upon this work:",
    prompt_project_name_error: "A name thou must give, else all is lost!",

    folder_exists: "This folder already holds dominion here.",
    folder_not_empty: "The directory is not empty, good sir.",
    folder_invalid: "Thou canst not name thy work after this very hall.",
    folder_delete: "Shall I raze this folder to dust?",
    folder_delete_done: "The folder hath been utterly banished.",
    rename_prompt: "Grant it a new name, I beseech thee:",
    rename_error: "Thou must provide a name, or despair!",
    cancel: "Fare thee well, the rite is abandoned.",
};

impl Tone {
    /// All tones in menu order
    pub const ALL: [Tone; 3] = [Tone::Default, Tone::GenZ, Tone::Shakespeare];

    /// The string table for this tone
    pub fn text(&self) -> &'static ToneText {
        match self {
            Tone::Default => &DEFAULT_TEXT,
            Tone::GenZ => &GENZ_TEXT,
            Tone::Shakespeare => &SHAKESPEARE_TEXT,
        }
    }

    /// Menu label shown in the tone prompt
    pub fn label(&self) -> &'static str {
        match self {
            Tone::Default => "Default - clean & professional",
            Tone::GenZ => "Gen Z - unhinged & cooked",
            Tone::Shakespeare => "Shakespeare - thee & thou maxxing",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Default => "default",
            Tone::GenZ => "genz",
            Tone::Shakespeare => "shakespeare",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tone {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(Tone::Default),
            "genz" | "gen-z" => Ok(Tone::GenZ),
            "shakespeare" => Ok(Tone::Shakespeare),
            other => Err(Error::unknown_tone(other)),
        }
    }
}

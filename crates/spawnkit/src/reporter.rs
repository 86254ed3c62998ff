//! Styled progress for scaffold events

use crate::output;
use console::style;
use indicatif::ProgressBar;
use spawnkit_core::ToneText;
use spawnkit_projects::{Event, Reporter};
use std::cell::RefCell;

/// Prints scaffold progress with the selected tone's wording
pub struct TerminalReporter {
    text: &'static ToneText,
    spinner: RefCell<Option<ProgressBar>>,
}

impl TerminalReporter {
    pub fn new(text: &'static ToneText) -> Self {
        Self {
            text,
            spinner: RefCell::new(None),
        }
    }

    fn start_spinner(&self, msg: &str) {
        self.stop_spinner();
        *self.spinner.borrow_mut() = Some(output::spinner(msg));
    }

    fn stop_spinner(&self) {
        if let Some(pb) = self.spinner.borrow_mut().take() {
            pb.finish_and_clear();
        }
    }
}

impl Reporter for TerminalReporter {
    fn report(&self, event: Event) {
        match event {
            Event::FolderExists { slug } => {
                println!("\n{} {}\n", style(self.text.folder_exists).blue(), style(slug).dim());
            }
            Event::FolderDeleted { slug } => {
                println!("{}", style(format!("{} \"{}\"", self.text.folder_delete_done, slug)).red());
            }
            Event::Creating { project } => {
                output::info(&format!("{}: {}", self.text.cooking, style(project).bold()));
            }
            Event::FetchStarted { .. } => self.start_spinner(self.text.fetching),
            Event::FetchSucceeded => {
                self.stop_spinner();
                output::success(self.text.template_ok);
            }
            Event::FetchFailed => {
                self.stop_spinner();
                output::error(self.text.template_fail);
            }
            // The install streams the package manager's own output, so no spinner here
            Event::InstallStarted { manager } => {
                output::info(&format!("{} ({})", self.text.install_start, manager));
            }
            Event::InstallSucceeded => output::success(self.text.install_ok),
            Event::InstallFailed => output::error(self.text.install_fail),
            Event::InstallSkipped => output::warning(self.text.install_skipped),
        }
    }
}

impl Drop for TerminalReporter {
    fn drop(&mut self) {
        self.stop_spinner();
    }
}

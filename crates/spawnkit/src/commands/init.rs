//! The scaffold command
//!
//! Runs the whole flow for every grammar form:
//! update notice, style selection, choice loading, then the scaffold workflow.

use anyhow::{anyhow, Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use clap::CommandFactory;
use spawnkit_core::{AppConfig, Tone, ToneText, UpdateChecker, VERSION};
use spawnkit_projects::{
    find_preset, ChoiceLoader, ChoiceSource, CommandInstaller, Error as ProjectsError, Outcome,
    PackageManager, PresetChoice, ScaffoldRequest, Scaffolder, SnapshotFetcher, Summary,
};
use std::process::ExitCode;
use tracing::{debug, info};

use crate::cli::{Cli, Invocation};
use crate::output;
use crate::prompt::{self, DialoguerPrompt};
use crate::reporter::TerminalReporter;

/// Run the scaffold flow described by the command line
pub async fn run(cli: &Cli) -> Result<ExitCode> {
    let invocation = cli.invocation();
    debug!("Invocation: {:?}", invocation);

    let mut config = AppConfig::from_env().with_choices_override(cli.choices.clone());
    if cli.no_update_check {
        config = config.without_update_check();
    }
    config.validate()?;
    info!("Running in {} mode", config.mode);

    if config.update_check {
        notify_if_outdated(&config.releases_url).await;
    }

    let Some(tone) = resolve_tone(cli.tone, &invocation)? else {
        output::warning(Tone::Default.text().cancel);
        return Ok(ExitCode::SUCCESS);
    };
    let text = tone.text();

    let base_dir = current_dir()?;
    let choices = load_choices(&config, &base_dir, text).await?;

    if let Some(preset) = &invocation.preset {
        if find_preset(&choices, preset).is_none() {
            output::error(&format!("{} ({})", text.preset_missing, preset));
            eprintln!("\n{}", Cli::command().render_usage());
            return Ok(ExitCode::FAILURE);
        }
    }

    let prompt = DialoguerPrompt::new(text);
    let reporter = TerminalReporter::new(text);
    let fetcher = SnapshotFetcher::new(config.codeload_url.clone())?;
    let installer = CommandInstaller::new(PackageManager::detect());

    let request = ScaffoldRequest {
        preset: invocation.preset.clone(),
        project_name: cli.name.clone().or_else(|| invocation.default_name()),
        skip_install: cli.skip_install,
    };

    let outcome = Scaffolder::new(base_dir, &prompt, &reporter, &fetcher, &installer)
        .run(&choices, &request)
        .await;
    drop(reporter);

    match outcome {
        Ok(Outcome::Completed(summary)) => {
            announce(&summary, text);
            Ok(ExitCode::SUCCESS)
        }
        Ok(Outcome::Cancelled) => {
            output::warning(text.cancel);
            Ok(ExitCode::SUCCESS)
        }
        Err(e @ ProjectsError::InvalidTarget { .. }) => {
            output::error(text.folder_invalid);
            Err(e.into())
        }
        Err(e @ ProjectsError::NoChoices) => {
            output::error(text.preset_missing);
            Err(e.into())
        }
        Err(e) => Err(e).context("Scaffolding failed"),
    }
}

/// Pick the wording style: flag or env first, then defaults for unattended
/// or non-terminal runs, otherwise ask
fn resolve_tone(explicit: Option<Tone>, invocation: &Invocation) -> Result<Option<Tone>> {
    if let Some(tone) = explicit {
        return Ok(Some(tone));
    }

    if invocation.unattended || !console::Term::stderr().is_term() {
        return Ok(Some(Tone::default()));
    }

    Ok(prompt::select_tone()?)
}

async fn load_choices(
    config: &AppConfig,
    base_dir: &Utf8Path,
    text: &ToneText,
) -> Result<Vec<PresetChoice>> {
    let spinner = output::spinner(loading_text(text));

    let loaded = fetch_choices(config, base_dir).await;

    match loaded {
        Ok(choices) => {
            spinner.finish_and_clear();
            Ok(choices)
        }
        Err(e) => {
            spinner.finish_and_clear();
            output::error(text.fetching_fail);
            Err(e).context("Failed to load preset choices")
        }
    }
}

/// Spinner line while the preset list loads; the template download has its own
fn loading_text(text: &ToneText) -> &'static str {
    text.wait
}

async fn fetch_choices(
    config: &AppConfig,
    base_dir: &Utf8Path,
) -> spawnkit_projects::Result<Vec<PresetChoice>> {
    let origin = config.choice_origin()?;
    debug!("Choice origin: {:?}", origin);
    let source = ChoiceSource::from_origin(origin)?;
    ChoiceLoader::new(base_dir)?.load(source).await
}

/// Best-effort release check; failures only reach the debug log
async fn notify_if_outdated(releases_url: &str) {
    let checker = match UpdateChecker::new(releases_url) {
        Ok(checker) => checker,
        Err(e) => {
            debug!("Skipping update check: {}", e);
            return;
        }
    };

    match checker.check(VERSION).await {
        Ok(Some(latest)) => output::info(&format!(
            "{}: {} -> {}",
            Tone::Default.text().update_available,
            VERSION,
            latest
        )),
        Ok(None) => debug!("spawnkit {} is up to date", VERSION),
        Err(e) => debug!("Update check failed: {}", e),
    }
}

fn announce(summary: &Summary, text: &ToneText) {
    output::header(text.done);
    for line in summary.announcement() {
        output::command(&line);
    }
    println!();
}

fn current_dir() -> Result<Utf8PathBuf> {
    let cwd = std::env::current_dir().context("Failed to read the current directory")?;
    Utf8PathBuf::from_path_buf(cwd)
        .map_err(|p| anyhow!("Current directory is not valid UTF-8: {}", p.display()))
}

//! The scaffold workflow
//!
//! Sequences preset selection, name acquisition, target resolution, directory
//! creation, template fetch and dependency install. Every collaborator is a
//! trait object so the whole flow runs without a terminal or network.

use crate::error::{Error, Result};
use crate::fetch::TemplateFetcher;
use crate::install::DependencyInstaller;
use crate::prompt::{Event, Prompt, Reporter};
use crate::target::{ProjectTarget, Resolution, TargetResolver};
use crate::types::{find_preset, PresetChoice};
use camino::Utf8PathBuf;
use std::fs;
use tracing::{debug, info, warn};

/// Initial value offered by the project-name prompt
pub const DEFAULT_PROJECT_NAME: &str = "spawned";

/// What the command line already decided
#[derive(Debug, Clone, Default)]
pub struct ScaffoldRequest {
    /// Preset slug; skips the preset prompt
    pub preset: Option<String>,
    /// Project name; skips the name prompt
    pub project_name: Option<String>,
    /// Leave dependencies uninstalled
    pub skip_install: bool,
}

/// A finished project
#[derive(Debug, Clone)]
pub struct Summary {
    pub preset: PresetChoice,
    pub target: ProjectTarget,
    pub installed: bool,
}

impl Summary {
    /// `cd <project>` followed by the preset's after-commands
    pub fn announcement(&self) -> Vec<String> {
        self.preset.announcement(self.target.slug())
    }
}

/// How a run ended, short of an error
#[derive(Debug, Clone)]
pub enum Outcome {
    Completed(Summary),
    Cancelled,
}

/// Runs one scaffold against a base directory
pub struct Scaffolder<'a> {
    base_dir: Utf8PathBuf,
    prompt: &'a dyn Prompt,
    reporter: &'a dyn Reporter,
    fetcher: &'a dyn TemplateFetcher,
    installer: &'a dyn DependencyInstaller,
    max_attempts: Option<usize>,
}

impl<'a> Scaffolder<'a> {
    pub fn new(
        base_dir: impl Into<Utf8PathBuf>,
        prompt: &'a dyn Prompt,
        reporter: &'a dyn Reporter,
        fetcher: &'a dyn TemplateFetcher,
        installer: &'a dyn DependencyInstaller,
    ) -> Self {
        Self {
            base_dir: base_dir.into(),
            prompt,
            reporter,
            fetcher,
            installer,
            max_attempts: None,
        }
    }

    /// Limit rename rounds during target resolution
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    /// Run the workflow over an already loaded list of choices
    pub async fn run(&self, choices: &[PresetChoice], request: &ScaffoldRequest) -> Result<Outcome> {
        if choices.is_empty() {
            return Err(Error::NoChoices);
        }

        let Some(preset) = self.select_preset(choices, request.preset.as_deref())? else {
            debug!("Preset selection aborted");
            return Ok(Outcome::Cancelled);
        };
        info!("Using preset {} ({})", preset.preset(), preset.repo());

        let Some(name) = self.project_name(request.project_name.as_deref())? else {
            debug!("Project name prompt aborted");
            return Ok(Outcome::Cancelled);
        };

        let mut resolver = TargetResolver::new(self.base_dir.clone());
        if let Some(max) = self.max_attempts {
            resolver = resolver.with_max_attempts(max);
        }

        let target = match resolver.resolve(&name, self.prompt, self.reporter)? {
            Resolution::Resolved(target) => target,
            Resolution::Cancelled => return Ok(Outcome::Cancelled),
            Resolution::Fatal(message) => return Err(Error::invalid_target(message)),
        };

        fs::create_dir_all(target.path())?;
        self.reporter.report(Event::Creating {
            project: target.slug().to_string(),
        });

        self.reporter.report(Event::FetchStarted {
            repo: preset.repo().to_string(),
        });
        if let Err(e) = self.fetcher.fetch(preset.repo(), target.path()).await {
            warn!("Template fetch failed: {}", e);
            self.reporter.report(Event::FetchFailed);
            return Err(e);
        }
        self.reporter.report(Event::FetchSucceeded);

        let installed = if request.skip_install {
            self.reporter.report(Event::InstallSkipped);
            false
        } else {
            self.reporter.report(Event::InstallStarted {
                manager: self.installer.name(),
            });
            if let Err(e) = self.installer.install(target.path()).await {
                warn!("Dependency install failed: {}", e);
                self.reporter.report(Event::InstallFailed);
                return Err(e);
            }
            self.reporter.report(Event::InstallSucceeded);
            true
        };

        Ok(Outcome::Completed(Summary {
            preset: preset.clone(),
            target,
            installed,
        }))
    }

    fn select_preset<'c>(
        &self,
        choices: &'c [PresetChoice],
        requested: Option<&str>,
    ) -> Result<Option<&'c PresetChoice>> {
        if let Some(slug) = requested {
            return find_preset(choices, slug)
                .map(Some)
                .ok_or_else(|| Error::unknown_preset(slug));
        }

        match self.prompt.select_preset(choices)? {
            Some(index) => choices
                .get(index)
                .map(Some)
                .ok_or_else(|| Error::prompt(format!("preset index {} out of range", index))),
            None => Ok(None),
        }
    }

    fn project_name(&self, requested: Option<&str>) -> Result<Option<String>> {
        match requested {
            Some(name) => Ok(Some(name.to_string())),
            None => self.prompt.input_project_name(DEFAULT_PROJECT_NAME),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::{RecordingReporter, ScriptedPrompt};
    use async_trait::async_trait;
    use camino::Utf8Path;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Writes a single README instead of downloading anything
    #[derive(Default)]
    struct FakeFetcher {
        fail: bool,
        repos: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl TemplateFetcher for FakeFetcher {
        async fn fetch(&self, repo: &str, destination: &Utf8Path) -> Result<()> {
            self.repos.lock().unwrap().push(repo.to_string());
            if self.fail {
                return Err(Error::fetch_failed("offline"));
            }
            fs::write(destination.join("README.md"), repo)?;
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeInstaller {
        dirs: Mutex<Vec<Utf8PathBuf>>,
    }

    #[async_trait]
    impl DependencyInstaller for FakeInstaller {
        fn name(&self) -> String {
            "fake".to_string()
        }

        async fn install(&self, project_dir: &Utf8Path) -> Result<()> {
            self.dirs.lock().unwrap().push(project_dir.to_path_buf());
            Ok(())
        }
    }

    fn base(tmp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap()
    }

    fn choices() -> Vec<PresetChoice> {
        vec![
            PresetChoice::new(
                "A".to_string(),
                "a".to_string(),
                "https://github.com/x/y".to_string(),
                vec!["npm run dev".to_string()],
            ),
            PresetChoice::new(
                "B".to_string(),
                "b".to_string(),
                "https://github.com/x/z".to_string(),
                vec![],
            ),
        ]
    }

    #[tokio::test]
    async fn test_init_with_preset_runs_without_prompting() {
        let tmp = TempDir::new().unwrap();
        let prompt = ScriptedPrompt::new();
        let reporter = RecordingReporter::new();
        let fetcher = FakeFetcher::default();
        let installer = FakeInstaller::default();

        let request = ScaffoldRequest {
            preset: Some("a".to_string()),
            project_name: Some("a".to_string()),
            skip_install: false,
        };
        let outcome = Scaffolder::new(base(&tmp), &prompt, &reporter, &fetcher, &installer)
            .run(&choices(), &request)
            .await
            .unwrap();

        let Outcome::Completed(summary) = outcome else {
            panic!("expected a completed run");
        };
        assert_eq!(summary.preset.preset(), "a");
        assert_eq!(summary.target.slug(), "a");
        assert!(summary.installed);
        assert_eq!(summary.announcement(), vec!["cd a", "npm run dev"]);
        assert!(tmp.path().join("a/README.md").exists());
        assert!(prompt.asked().is_empty());
        assert_eq!(installer.dirs.lock().unwrap().len(), 1);
        assert_eq!(
            reporter.events(),
            vec![
                Event::Creating {
                    project: "a".to_string()
                },
                Event::FetchStarted {
                    repo: "https://github.com/x/y".to_string()
                },
                Event::FetchSucceeded,
                Event::InstallStarted {
                    manager: "fake".to_string()
                },
                Event::InstallSucceeded,
            ]
        );
    }

    #[tokio::test]
    async fn test_interactive_run_slugifies_name_and_skips_install() {
        let tmp = TempDir::new().unwrap();
        let prompt = ScriptedPrompt::new()
            .with_preset("b")
            .with_project_name("My Cool App!!");
        let reporter = RecordingReporter::new();
        let fetcher = FakeFetcher::default();
        let installer = FakeInstaller::default();

        let request = ScaffoldRequest {
            skip_install: true,
            ..Default::default()
        };
        let outcome = Scaffolder::new(base(&tmp), &prompt, &reporter, &fetcher, &installer)
            .run(&choices(), &request)
            .await
            .unwrap();

        let Outcome::Completed(summary) = outcome else {
            panic!("expected a completed run");
        };
        assert_eq!(summary.target.slug(), "my-cool-app");
        assert!(!summary.installed);
        assert_eq!(summary.announcement(), vec!["cd my-cool-app"]);
        assert!(installer.dirs.lock().unwrap().is_empty());
        assert!(reporter.events().contains(&Event::InstallSkipped));
        assert_eq!(prompt.asked(), vec!["preset", "project_name"]);
    }

    #[tokio::test]
    async fn test_aborted_preset_prompt_cancels() {
        let tmp = TempDir::new().unwrap();
        let prompt = ScriptedPrompt::new().aborting_preset();
        let reporter = RecordingReporter::new();
        let fetcher = FakeFetcher::default();
        let installer = FakeInstaller::default();

        let outcome = Scaffolder::new(base(&tmp), &prompt, &reporter, &fetcher, &installer)
            .run(&choices(), &ScaffoldRequest::default())
            .await
            .unwrap();

        assert!(matches!(outcome, Outcome::Cancelled));
        assert!(fetcher.repos.lock().unwrap().is_empty());
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_preset_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let prompt = ScriptedPrompt::new();
        let reporter = RecordingReporter::new();
        let fetcher = FakeFetcher::default();
        let installer = FakeInstaller::default();

        let request = ScaffoldRequest {
            preset: Some("nope".to_string()),
            ..Default::default()
        };
        let err = Scaffolder::new(base(&tmp), &prompt, &reporter, &fetcher, &installer)
            .run(&choices(), &request)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::UnknownPreset { .. }));
    }

    #[tokio::test]
    async fn test_empty_choices_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let prompt = ScriptedPrompt::new();
        let reporter = RecordingReporter::new();
        let fetcher = FakeFetcher::default();
        let installer = FakeInstaller::default();

        let err = Scaffolder::new(base(&tmp), &prompt, &reporter, &fetcher, &installer)
            .run(&[], &ScaffoldRequest::default())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::NoChoices));
    }

    #[tokio::test]
    async fn test_forbidden_name_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let prompt = ScriptedPrompt::new();
        let reporter = RecordingReporter::new();
        let fetcher = FakeFetcher::default();
        let installer = FakeInstaller::default();

        let request = ScaffoldRequest {
            preset: Some("a".to_string()),
            project_name: Some(".".to_string()),
            skip_install: false,
        };
        let err = Scaffolder::new(base(&tmp), &prompt, &reporter, &fetcher, &installer)
            .run(&choices(), &request)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InvalidTarget { .. }));
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_fetch_failure_skips_install() {
        let tmp = TempDir::new().unwrap();
        let prompt = ScriptedPrompt::new();
        let reporter = RecordingReporter::new();
        let fetcher = FakeFetcher {
            fail: true,
            ..Default::default()
        };
        let installer = FakeInstaller::default();

        let request = ScaffoldRequest {
            preset: Some("a".to_string()),
            project_name: Some("a".to_string()),
            skip_install: false,
        };
        let err = Scaffolder::new(base(&tmp), &prompt, &reporter, &fetcher, &installer)
            .run(&choices(), &request)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::FetchFailed { .. }));
        assert!(reporter.events().contains(&Event::FetchFailed));
        assert!(installer.dirs.lock().unwrap().is_empty());
    }
}

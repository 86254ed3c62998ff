//! Dependency installation with the package manager the user runs

use crate::error::{Error, Result};
use async_trait::async_trait;
use camino::Utf8Path;
use std::fmt;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

/// Environment variable set by npm, pnpm, yarn and bun when they launch a binary
pub const USER_AGENT_ENV: &str = "npm_config_user_agent";

/// Supported JavaScript package managers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PackageManager {
    #[default]
    Npm,
    Pnpm,
    Yarn,
    Bun,
}

impl PackageManager {
    /// Detect from `npm_config_user_agent`, defaulting to npm
    pub fn detect() -> Self {
        Self::from_user_agent(std::env::var(USER_AGENT_ENV).ok().as_deref())
    }

    /// Parse a user agent such as `pnpm/9.1.0 npm/? node/v20.11.0 linux x64`
    pub fn from_user_agent(user_agent: Option<&str>) -> Self {
        let name = user_agent
            .and_then(|ua| ua.split_whitespace().next())
            .and_then(|token| token.split('/').next())
            .unwrap_or_default();

        match name {
            "pnpm" => PackageManager::Pnpm,
            "yarn" => PackageManager::Yarn,
            "bun" => PackageManager::Bun,
            _ => PackageManager::Npm,
        }
    }

    /// Executable name
    pub fn command(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Yarn => "yarn",
            PackageManager::Bun => "bun",
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command())
    }
}

/// Installs a freshly fetched project's dependencies
#[async_trait]
pub trait DependencyInstaller: Send + Sync {
    /// Name shown to the user (e.g. `pnpm`)
    fn name(&self) -> String;

    /// Run the install inside `project_dir`
    async fn install(&self, project_dir: &Utf8Path) -> Result<()>;
}

/// Runs `<package manager> install` as a child process with inherited stdio
#[derive(Debug, Clone, Copy)]
pub struct CommandInstaller {
    manager: PackageManager,
}

impl CommandInstaller {
    pub fn new(manager: PackageManager) -> Self {
        Self { manager }
    }
}

#[async_trait]
impl DependencyInstaller for CommandInstaller {
    fn name(&self) -> String {
        self.manager.to_string()
    }

    async fn install(&self, project_dir: &Utf8Path) -> Result<()> {
        let program = self.manager.command();

        let executable = which::which(program)
            .map_err(|_| Error::install_failed(format!("{} was not found in PATH", program)))?;
        debug!("Using {} at {}", program, executable.display());

        info!("Running {} install in {}", program, project_dir);
        let status = Command::new(executable)
            .arg("install")
            .current_dir(project_dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await?;

        if !status.success() {
            return Err(Error::install_failed(format!(
                "{} install exited with {}",
                program, status
            )));
        }

        Ok(())
    }
}

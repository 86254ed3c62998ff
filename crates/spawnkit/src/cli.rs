//! CLI argument parsing with clap

use clap::{Args, Parser, Subcommand};
use spawnkit_core::Tone;

/// spawnkit - Spawn a dApp project from a community starter kit
#[derive(Parser, Debug)]
#[command(name = "spawnkit")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Wording style (default, genz, shakespeare); skips the style prompt
    #[arg(long, global = true, env = "SPAWNKIT_TONE")]
    pub tone: Option<Tone>,

    /// Load presets from a local JSON file or an http(s) URL (also SPAWNKIT_CHOICES)
    #[arg(long, global = true, value_name = "PATH_OR_URL")]
    pub choices: Option<String>,

    /// Project folder name; skips the name prompt
    #[arg(short, long, global = true)]
    pub name: Option<String>,

    /// Do not install dependencies
    #[arg(long, global = true)]
    pub skip_install: bool,

    /// Do not check for a newer spawnkit release (also SPAWNKIT_NO_UPDATE_CHECK)
    #[arg(long, global = true)]
    pub no_update_check: bool,

    /// Preset to scaffold; skips the preset prompt
    #[arg(value_name = "PRESET")]
    pub preset: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scaffold a project; with a preset, run without prompts
    Init(InitArgs),
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Preset to scaffold
    #[arg(value_name = "PRESET")]
    pub preset: Option<String>,
}

/// The command line folded into one canonical form
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Invocation {
    /// Preset slug given on the command line
    pub preset: Option<String>,
    /// `init <preset>`: use defaults instead of the style and name prompts
    pub unattended: bool,
}

impl Invocation {
    /// Project name to use without asking, if any
    pub fn default_name(&self) -> Option<String> {
        if self.unattended {
            self.preset.clone()
        } else {
            None
        }
    }
}

impl Cli {
    /// Classify the command line before anything is prompted
    ///
    /// `spawnkit` and `spawnkit init` are the same interactive run.
    /// `spawnkit <preset>` preselects the preset. `spawnkit init <preset>`
    /// also skips the style and project-name prompts.
    pub fn invocation(&self) -> Invocation {
        match &self.command {
            Some(Commands::Init(args)) => Invocation {
                preset: args.preset.clone(),
                unattended: args.preset.is_some(),
            },
            None => Invocation {
                preset: self.preset.clone(),
                unattended: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("spawnkit").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_bare_and_init_are_the_same_run() {
        assert_eq!(parse(&[]).invocation(), Invocation::default());
        assert_eq!(parse(&["init"]).invocation(), Invocation::default());
    }

    #[test]
    fn test_positional_preset_keeps_prompts() {
        let invocation = parse(&["next-hardhat"]).invocation();
        assert_eq!(invocation.preset.as_deref(), Some("next-hardhat"));
        assert!(!invocation.unattended);
        assert_eq!(invocation.default_name(), None);
    }

    #[test]
    fn test_init_with_preset_is_unattended() {
        let invocation = parse(&["init", "foundry"]).invocation();
        assert_eq!(invocation.preset.as_deref(), Some("foundry"));
        assert!(invocation.unattended);
        assert_eq!(invocation.default_name().as_deref(), Some("foundry"));
    }

    #[test]
    fn test_global_flags() {
        let cli = parse(&["init", "a", "--tone", "shakespeare", "-n", "My App", "--skip-install", "-vv"]);
        assert_eq!(cli.tone, Some(Tone::Shakespeare));
        assert_eq!(cli.name.as_deref(), Some("My App"));
        assert!(cli.skip_install);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_unknown_tone_is_rejected() {
        let result = Cli::try_parse_from(["spawnkit", "--tone", "pirate"]);
        assert!(result.is_err());
    }
}

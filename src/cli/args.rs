//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::runner::Role;

/// Provision - developer machine setup.
#[derive(Debug, Parser)]
#[command(name = "provision")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides ~/.provision/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Never prompt; answers come from PROVISION_PROMPT_* variables
    #[arg(long, global = true)]
    pub non_interactive: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Set up the base machine: toolchain checks, packages and SDK
    Machine(MachineArgs),

    /// Apply opt-in roles on top of a set-up machine
    Panda(PandaArgs),

    /// Install Android SDK components only
    Sdk(SdkArgs),

    /// Show resolved configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `machine` command.
#[derive(Debug, Clone, Default, Args)]
pub struct MachineArgs {
    /// Continue past failed installs without asking
    #[arg(short, long)]
    pub quiet: bool,

    /// Skip Android SDK components
    #[arg(long)]
    pub skip_sdk: bool,
}

/// Arguments for the `panda` command.
#[derive(Debug, Clone, Default, Args)]
pub struct PandaArgs {
    /// Editor package and configuration
    #[arg(short, long)]
    pub emacs: bool,

    /// Build agent support
    #[arg(short, long)]
    pub agent: bool,

    /// Bamboo support
    #[arg(short, long)]
    pub bamboo: bool,

    /// Web support
    #[arg(short, long)]
    pub web: bool,

    /// Shell profile
    #[arg(short = 'i', long)]
    pub environment: bool,

    /// Kiln credentials for Mercurial and git
    #[arg(short, long)]
    pub kiln: bool,

    /// Github token for Homebrew
    #[arg(short, long)]
    pub github: bool,

    /// Continue past failed installs without asking
    #[arg(short, long)]
    pub quiet: bool,
}

impl PandaArgs {
    /// Selected roles in run order.
    pub fn roles(&self) -> Vec<Role> {
        Role::ALL
            .into_iter()
            .filter(|role| match role {
                Role::Environment => self.environment,
                Role::Kiln => self.kiln,
                Role::Github => self.github,
                Role::Emacs => self.emacs,
                Role::Agent => self.agent,
                Role::Bamboo => self.bamboo,
                Role::Web => self.web,
            })
            .collect()
    }
}

/// Arguments for the `sdk` command.
#[derive(Debug, Clone, Default, Args)]
pub struct SdkArgs {
    /// Continue past failed installs without asking
    #[arg(short, long)]
    pub quiet: bool,

    /// Print the components that would be installed
    #[arg(long)]
    pub list: bool,
}

/// Arguments for the `config` command.
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigArgs {
    /// Output as JSON
    #[arg(long, conflicts_with = "schema")]
    pub json: bool,

    /// Print the configuration JSON Schema
    #[arg(long)]
    pub schema: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["provision", "machine", "--debug", "-c", "/tmp/c.yml"]);
        assert!(cli.debug);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.yml")));
        assert!(matches!(cli.command, Some(Commands::Machine(_))));
    }

    #[test]
    fn parses_machine_flags() {
        let cli = Cli::parse_from(["provision", "machine", "-q", "--skip-sdk"]);
        match cli.command {
            Some(Commands::Machine(args)) => {
                assert!(args.quiet);
                assert!(args.skip_sdk);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn panda_short_flags_select_roles_in_fixed_order() {
        let cli = Cli::parse_from(["provision", "panda", "-w", "-a", "-i", "-k"]);
        match cli.command {
            Some(Commands::Panda(args)) => {
                assert_eq!(
                    args.roles(),
                    vec![Role::Environment, Role::Kiln, Role::Agent, Role::Web]
                );
                assert!(!args.quiet);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn panda_without_flags_selects_nothing() {
        assert!(PandaArgs::default().roles().is_empty());
    }

    #[test]
    fn config_json_and_schema_conflict() {
        let result = Cli::try_parse_from(["provision", "config", "--json", "--schema"]);
        assert!(result.is_err());
    }

    #[test]
    fn completions_requires_shell() {
        assert!(Cli::try_parse_from(["provision", "completions"]).is_err());
        let cli = Cli::parse_from(["provision", "completions", "zsh"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Completions(CompletionsArgs { shell: Shell::Zsh }))
        ));
    }
}

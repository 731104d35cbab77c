//! Panda command implementation.
//!
//! The `provision panda` command applies the selected roles.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use clap::CommandFactory;

use crate::cli::args::{Cli, PandaArgs};
use crate::config::{load_config, ProvisionConfig};
use crate::error::Result;
use crate::install::Installer;
use crate::runner::RoleRunner;
use crate::shell::{home_dir, CommandRunner, SystemRunner};
use crate::ui::UserInterface;
use crate::writer::{expand_home, HostsFile, TokenResolver};

use super::dispatcher::{Command, CommandResult};

/// The panda command implementation.
pub struct PandaCommand {
    config_path: Option<PathBuf>,
    args: PandaArgs,
}

impl PandaCommand {
    /// Create a new panda command.
    pub fn new(config_path: Option<&Path>, args: PandaArgs) -> Self {
        Self {
            config_path: config_path.map(Path::to_path_buf),
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &PandaArgs {
        &self.args
    }

    /// Run the selected roles with the given runner, home directory and
    /// hosts file.
    pub fn run_with(
        &self,
        config: &ProvisionConfig,
        runner: &mut dyn CommandRunner,
        ui: &mut dyn UserInterface,
        home: &Path,
        hosts: HostsFile,
    ) -> Result<CommandResult> {
        let roles = self.args.roles();
        let env: HashMap<String, String> = std::env::vars().collect();
        let mut roles_runner =
            RoleRunner::new(config, TokenResolver::new(hosts), home.to_path_buf(), env);

        let mut installer =
            Installer::new(runner, ui, &config.managers).with_quiet(self.args.quiet);
        roles_runner.run_roles(&roles, &mut installer)?;
        Ok(CommandResult::success())
    }
}

impl Command for PandaCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if self.args.roles().is_empty() {
            let mut cli = Cli::command();
            if let Some(panda) = cli.find_subcommand_mut("panda") {
                ui.message(&panda.render_help().to_string());
            }
            return Ok(CommandResult::failure(1));
        }

        let (config, source) = load_config(self.config_path.as_deref())?;
        let home = home_dir();
        let hosts_path = expand_home(&config.credentials.hosts_file, &home);
        let hosts = HostsFile::load(&hosts_path)?;
        tracing::debug!(
            config = %source.display_path().display(),
            hosts = %hosts_path.display(),
            roles = ?self.args.roles(),
            "Starting role setup"
        );

        let mut runner = SystemRunner::new();
        self.run_with(&config, &mut runner, ui, &home, hosts)
    }
}

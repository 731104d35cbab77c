//! Machine command implementation.
//!
//! The `provision machine` command runs the base setup sequence.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::cli::args::MachineArgs;
use crate::config::{load_config, ProvisionConfig};
use crate::error::Result;
use crate::install::Installer;
use crate::runner::{MachineOptions, MachineRunner};
use crate::shell::{CommandRunner, SystemRunner};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The machine command implementation.
pub struct MachineCommand {
    config_path: Option<PathBuf>,
    args: MachineArgs,
}

impl MachineCommand {
    /// Create a new machine command.
    pub fn new(config_path: Option<&Path>, args: MachineArgs) -> Self {
        Self {
            config_path: config_path.map(Path::to_path_buf),
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &MachineArgs {
        &self.args
    }

    /// Run against a loaded config with the given runner and PATH.
    pub fn run_with(
        &self,
        config: &ProvisionConfig,
        runner: &mut dyn CommandRunner,
        ui: &mut dyn UserInterface,
        path_value: &OsStr,
    ) -> Result<CommandResult> {
        let options = MachineOptions {
            skip_sdk: self.args.skip_sdk,
        };
        let mut installer =
            Installer::new(runner, ui, &config.managers).with_quiet(self.args.quiet);
        MachineRunner::new(config).run(&mut installer, &options, path_value)?;
        Ok(CommandResult::success())
    }
}

impl Command for MachineCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let (config, source) = load_config(self.config_path.as_deref())?;
        tracing::debug!(config = %source.display_path().display(), quiet = self.args.quiet, "Starting machine setup");

        let path_value = std::env::var_os("PATH").unwrap_or_else(OsString::new);
        let mut runner = SystemRunner::new();
        self.run_with(&config, &mut runner, ui, &path_value)
    }
}

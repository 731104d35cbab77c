//! SDK command implementation.
//!
//! The `provision sdk` command discovers and installs Android SDK
//! components without the rest of the machine setup.

use std::path::{Path, PathBuf};

use crate::cli::args::SdkArgs;
use crate::config::{load_config, ProvisionConfig};
use crate::error::Result;
use crate::install::Installer;
use crate::sdk;
use crate::shell::{CommandRunner, SystemRunner};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The sdk command implementation.
pub struct SdkCommand {
    config_path: Option<PathBuf>,
    args: SdkArgs,
}

impl SdkCommand {
    /// Create a new sdk command.
    pub fn new(config_path: Option<&Path>, args: SdkArgs) -> Self {
        Self {
            config_path: config_path.map(Path::to_path_buf),
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &SdkArgs {
        &self.args
    }

    /// Plan, then list or install, with the given runner.
    pub fn run_with(
        &self,
        config: &ProvisionConfig,
        runner: &mut dyn CommandRunner,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let mut installer =
            Installer::new(runner, ui, &config.managers).with_quiet(self.args.quiet);
        installer.ui().show_header("Android SDK components");
        let plan = sdk::plan(&config.sdk, &mut installer)?;

        if self.args.list {
            for component in &plan.components {
                installer.ui().message(component);
            }
            return Ok(CommandResult::success());
        }

        let report = sdk::install_components(&config.sdk, &plan, &mut installer)?;
        if report.has_failures() {
            installer.ui().warning(&format!(
                "{} SDK component(s) failed and were skipped",
                report.skipped.len()
            ));
        } else {
            installer.ui().success(&format!(
                "Installed {} SDK component(s)",
                report.installed.len()
            ));
        }

        Ok(CommandResult::success())
    }
}

impl Command for SdkCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let (config, source) = load_config(self.config_path.as_deref())?;
        tracing::debug!(config = %source.display_path().display(), "Starting SDK setup");

        let mut runner = SystemRunner::new();
        self.run_with(&config, &mut runner, ui)
    }
}

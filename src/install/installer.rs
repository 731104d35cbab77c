//! Install-with-recovery.
//!
//! Every install and role command goes through [`Installer::run_step`],
//! which classifies a non-zero exit by [`InstallPolicy`]:
//!
//! | Policy | On failure |
//! |--------|------------|
//! | fatal  | print the error, stop with the child's exit code |
//! | prompt | print the error, ask "Continue? (y/n)" |
//! | silent | print the error, continue |
//!
//! Items run strictly in order, one at a time.

use crate::config::ManagersConfig;
use crate::error::{ProvisionError, Result};
use crate::shell::{CommandRunner, Invocation, NOT_FOUND_EXIT_CODE};
use crate::ui::UserInterface;

use super::decision::{ask_to_continue, Decision};
use super::manager::PackageSpec;
use super::policy::InstallPolicy;

/// Outcome of a step that did not stop the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Exit code 0.
    Succeeded,
    /// Failed, and the policy (or the operator) chose to continue.
    Skipped {
        /// The failing exit code (`None` if killed by a signal).
        code: Option<i32>,
    },
}

/// What `install_all` did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallReport {
    /// Packages installed successfully, in order.
    pub installed: Vec<String>,
    /// Packages that failed and were skipped, with their exit codes.
    pub skipped: Vec<(String, Option<i32>)>,
}

impl InstallReport {
    /// Whether anything failed.
    pub fn has_failures(&self) -> bool {
        !self.skipped.is_empty()
    }

    /// Fold another report into this one.
    pub fn merge(&mut self, other: InstallReport) {
        self.installed.extend(other.installed);
        self.skipped.extend(other.skipped);
    }
}

/// Runs installs and commands, applying the failure policy.
pub struct Installer<'a> {
    runner: &'a mut dyn CommandRunner,
    ui: &'a mut dyn UserInterface,
    managers: ManagersConfig,
    quiet: bool,
}

impl<'a> Installer<'a> {
    /// Create an installer using the given manager commands.
    pub fn new(
        runner: &'a mut dyn CommandRunner,
        ui: &'a mut dyn UserInterface,
        managers: &ManagersConfig,
    ) -> Self {
        Self {
            runner,
            ui,
            managers: managers.clone(),
            quiet: false,
        }
    }

    /// Under quiet mode the prompt policy behaves as silent.
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Access the UI.
    pub fn ui(&mut self) -> &mut dyn UserInterface {
        &mut *self.ui
    }

    /// Access the command runner.
    pub fn runner(&mut self) -> &mut dyn CommandRunner {
        &mut *self.runner
    }

    /// Borrow the runner and UI together.
    pub fn parts(&mut self) -> (&mut dyn CommandRunner, &mut dyn UserInterface) {
        (&mut *self.runner, &mut *self.ui)
    }

    /// Install one package.
    ///
    /// # Errors
    ///
    /// `InstallFailed` under the fatal policy, `Aborted` when the operator
    /// answers `n`.
    pub fn install(&mut self, spec: &PackageSpec, policy: InstallPolicy) -> Result<StepOutcome> {
        let invocation = spec.invocation(&self.managers)?;
        self.execute(&invocation, policy, "Failed to install package")
    }

    /// Run any command under the install failure policy.
    pub fn run_step(&mut self, invocation: &Invocation, policy: InstallPolicy) -> Result<StepOutcome> {
        self.execute(invocation, policy, "Command failed")
    }

    /// Install packages in order.
    ///
    /// Stops at the first error (fatal failure or abort); otherwise returns
    /// what was installed and what was skipped.
    pub fn install_all<'s, I>(&mut self, specs: I, policy: InstallPolicy) -> Result<InstallReport>
    where
        I: IntoIterator<Item = &'s PackageSpec>,
    {
        let mut report = InstallReport::default();

        for spec in specs {
            match self.install(spec, policy)? {
                StepOutcome::Succeeded => report.installed.push(spec.to_string()),
                StepOutcome::Skipped { code } => report.skipped.push((spec.to_string(), code)),
            }
        }

        Ok(report)
    }

    fn execute(
        &mut self,
        invocation: &Invocation,
        policy: InstallPolicy,
        failure_label: &str,
    ) -> Result<StepOutcome> {
        let policy = policy.quieted(self.quiet);
        let command = invocation.to_string();
        tracing::debug!(%command, %policy, "Running step");

        let result = self.runner.run(invocation)?;

        if result.success {
            if self.ui.output_mode().shows_command_output() && !result.stderr.trim().is_empty() {
                self.ui.message(result.stderr.trim_end());
            }
            return Ok(StepOutcome::Succeeded);
        }

        let code = result.exit_code;
        tracing::debug!(%command, ?code, "Step failed");

        self.ui.error(&format!("{}: {}", failure_label, command));
        let hint = (code == Some(NOT_FOUND_EXIT_CODE))
            .then(|| format!("Is '{}' installed and on PATH?", invocation.program));
        self.ui
            .show_error_block(&command, result.stderr.trim_end(), hint.as_deref());

        match policy {
            InstallPolicy::Fatal => Err(ProvisionError::InstallFailed { command, code }),
            InstallPolicy::Silent => Ok(StepOutcome::Skipped { code }),
            InstallPolicy::Prompt => match ask_to_continue(&mut *self.ui)? {
                Decision::Continue => Ok(StepOutcome::Skipped { code }),
                Decision::Abort => {
                    self.ui.message("Aborting.");
                    Err(ProvisionError::Aborted { command, code })
                }
            },
        }
    }
}

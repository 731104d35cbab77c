//! Base machine setup.
//!
//! Runs, in order: preflight checks, package-manager housekeeping,
//! bootstrap runtimes, tool-location checks, the package list and the
//! SDK components.

use std::ffi::OsStr;

use crate::config::ProvisionConfig;
use crate::error::{ProvisionError, Result};
use crate::install::{InstallPolicy, InstallReport, Installer};
use crate::preflight::{run_preflight, split_path_value, verify_tool_locations};
use crate::sdk;
use crate::shell::Invocation;

/// Options for a machine run.
#[derive(Debug, Clone, Default)]
pub struct MachineOptions {
    /// Skip the SDK component step.
    pub skip_sdk: bool,
}

/// Runs the machine setup sequence.
pub struct MachineRunner<'a> {
    config: &'a ProvisionConfig,
}

impl<'a> MachineRunner<'a> {
    /// Create a runner for a configuration.
    pub fn new(config: &'a ProvisionConfig) -> Self {
        Self { config }
    }

    /// Run every step. `path_value` is the PATH to check and search.
    pub fn run(
        &self,
        installer: &mut Installer<'_>,
        options: &MachineOptions,
        path_value: &OsStr,
    ) -> Result<InstallReport> {
        let config = self.config;

        installer.ui().show_header("Preflight");
        {
            let (runner, ui) = installer.parts();
            run_preflight(&config.preflight, path_value, runner, ui)?;
        }

        self.housekeeping(installer)?;

        let mut report = InstallReport::default();

        for spec in &config.bootstrap {
            installer
                .ui()
                .message(&format!("Installing {}...", spec.name));
            installer.install(spec, InstallPolicy::Fatal)?;
            report.installed.push(spec.to_string());
        }

        let path_entries = split_path_value(path_value);
        verify_tool_locations(&config.tool_locations, &path_entries, installer.ui())?;

        // List order is kept; a header starts each run of one manager.
        for run in config.packages.chunk_by(|a, b| a.manager == b.manager) {
            installer.ui().show_header(&format!(
                "Installing {} packages...",
                run[0].manager.name().to_uppercase()
            ));
            report.merge(installer.install_all(run, InstallPolicy::Prompt)?);
        }

        if config.sdk.enabled && !options.skip_sdk {
            installer.ui().show_header("Android SDK components");
            let plan = sdk::plan(&config.sdk, installer)?;
            report.merge(sdk::install_components(&config.sdk, &plan, installer)?);
        } else {
            tracing::debug!("Skipping SDK components");
        }

        if report.has_failures() {
            installer.ui().warning(&format!(
                "Setup finished with {} failed item(s): {}",
                report.skipped.len(),
                report
                    .skipped
                    .iter()
                    .map(|(name, _)| name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        } else {
            installer.ui().success("Machine setup complete");
        }

        Ok(report)
    }

    fn housekeeping(&self, installer: &mut Installer<'_>) -> Result<()> {
        let pm = &self.config.package_manager;

        if let Some(doctor) = &pm.doctor {
            installer.ui().message("Checking package manager health...");
            installer.run_step(&argv_invocation(doctor, "doctor")?, pm.policy)?;
        }

        if !pm.taps.is_empty() {
            installer.ui().message("Adding additional homebrew taps...");
            let tap = argv_invocation(&pm.tap, "tap")?;
            for name in &pm.taps {
                installer.run_step(&tap.clone().arg(name), pm.policy)?;
            }
        }

        if let Some(update) = &pm.update {
            installer.ui().message("Updating Homebrew...");
            installer.run_step(&argv_invocation(update, "update")?, pm.policy)?;
        }

        Ok(())
    }
}

fn argv_invocation(argv: &[String], what: &str) -> Result<Invocation> {
    Invocation::from_argv(argv).ok_or_else(|| ProvisionError::ConfigValidationError {
        message: format!("Package manager '{}' command is empty", what),
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::config::{load_builtin, ManagersConfig};
    use crate::install::{ManagerKind, PackageSpec, CONTINUE_PROMPT_KEY};
    use crate::shell::ScriptedRunner;
    use crate::ui::MockUI;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    /// A PATH where python and ruby resolve to the given directory.
    fn tool_dir() -> TempDir {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        for tool in ["python", "ruby"] {
            let path = temp.path().join(tool);
            fs::write(&path, "#!/bin/sh\n").unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        }
        temp
    }

    fn config_for(bin: &Path) -> ProvisionConfig {
        let mut config = load_builtin().unwrap();
        for location in &mut config.tool_locations {
            location.expected = bin.join(&location.tool);
        }
        if let Some(order) = &mut config.preflight.path_order {
            order.first = bin.display().to_string();
        }
        config.sdk.enabled = false;
        config
    }

    fn path_with(bin: &Path) -> std::ffi::OsString {
        std::env::join_paths([bin, Path::new("/usr/bin")]).unwrap()
    }

    #[test]
    fn full_run_installs_everything_in_order() {
        let bin = tool_dir();
        let config = config_for(bin.path());
        let mut runner = ScriptedRunner::new();
        let mut ui = MockUI::new();

        let report = {
            let mut installer = Installer::new(&mut runner, &mut ui, &ManagersConfig::default());
            MachineRunner::new(&config)
                .run(&mut installer, &MachineOptions::default(), &path_with(bin.path()))
                .unwrap()
        };

        let calls = runner.calls();
        assert_eq!(calls[0], "xcrun clang --version");
        assert_eq!(calls[3], "brew doctor");
        assert_eq!(calls[4], "brew tap homebrew/versions");
        assert_eq!(calls[8], "brew update");
        assert_eq!(calls[9], "brew install python");
        assert_eq!(calls[10], "brew install ruby193");
        assert_eq!(calls[11], "brew install mercurial");
        assert_eq!(calls.last().unwrap(), "gem install systemu");
        assert!(!report.has_failures());
        assert!(ui.has_success("Machine setup complete"));
        assert!(ui.headers().iter().any(|h| h == "Installing PIP packages..."));
    }

    #[test]
    fn preflight_failure_runs_nothing_else() {
        let bin = tool_dir();
        let config = config_for(bin.path());
        let mut runner = ScriptedRunner::new();
        runner.fail("java -version", 1, "");
        let mut ui = MockUI::new();

        let err = {
            let mut installer = Installer::new(&mut runner, &mut ui, &ManagersConfig::default());
            MachineRunner::new(&config)
                .run(&mut installer, &MachineOptions::default(), &path_with(bin.path()))
                .unwrap_err()
        };

        assert_eq!(err.exit_code(), 1);
        assert!(!runner.calls().iter().any(|c| c.contains("install")));
        assert!(!runner.was_called("brew doctor"));
    }

    #[test]
    fn path_order_failure_runs_nothing_else() {
        let bin = tool_dir();
        let config = config_for(bin.path());
        let mut runner = ScriptedRunner::new();
        let mut ui = MockUI::new();
        let reversed = std::env::join_paths([Path::new("/usr/bin"), bin.path()]).unwrap();

        let err = {
            let mut installer = Installer::new(&mut runner, &mut ui, &ManagersConfig::default());
            MachineRunner::new(&config)
                .run(&mut installer, &MachineOptions::default(), &reversed)
                .unwrap_err()
        };

        assert_eq!(err.exit_code(), 1);
        assert_eq!(runner.calls().len(), 3);
    }

    #[test]
    fn bootstrap_failure_is_fatal_with_child_code() {
        let bin = tool_dir();
        let config = config_for(bin.path());
        let mut runner = ScriptedRunner::new();
        runner.fail("brew install python", 9, "Error: python");
        let mut ui = MockUI::new();

        let err = {
            let mut installer = Installer::new(&mut runner, &mut ui, &ManagersConfig::default());
            MachineRunner::new(&config)
                .run(&mut installer, &MachineOptions::default(), &path_with(bin.path()))
                .unwrap_err()
        };

        assert_eq!(err.exit_code(), 9);
        assert!(!runner.was_called("brew install ruby193"));
    }

    #[test]
    fn doctor_failure_prompts() {
        let bin = tool_dir();
        let config = config_for(bin.path());
        let mut runner = ScriptedRunner::new();
        runner.fail("brew doctor", 1, "Warning: unbrewed header files");
        let mut ui = MockUI::new();
        ui.queue_prompt_responses(CONTINUE_PROMPT_KEY, vec!["n"]);

        let err = {
            let mut installer = Installer::new(&mut runner, &mut ui, &ManagersConfig::default());
            MachineRunner::new(&config)
                .run(&mut installer, &MachineOptions::default(), &path_with(bin.path()))
                .unwrap_err()
        };

        assert!(matches!(err, ProvisionError::Aborted { code: Some(1), .. }));
        assert!(!runner.was_called("brew update"));
    }

    #[test]
    fn quiet_run_continues_past_package_failures() {
        let bin = tool_dir();
        let config = config_for(bin.path());
        let mut runner = ScriptedRunner::new();
        runner.fail("brew install ack", 1, "");
        runner.fail("gem install json", 1, "");
        let mut ui = MockUI::new();

        let report = {
            let mut installer = Installer::new(&mut runner, &mut ui, &ManagersConfig::default())
                .with_quiet(true);
            MachineRunner::new(&config)
                .run(&mut installer, &MachineOptions::default(), &path_with(bin.path()))
                .unwrap()
        };

        assert_eq!(report.skipped.len(), 2);
        assert!(ui.prompts_shown().is_empty());
        assert!(ui.has_warning("ack"));
        assert!(runner.was_called("gem install systemu"));
    }

    #[test]
    fn misplaced_tool_stops_before_packages() {
        let bin = tool_dir();
        let mut config = config_for(bin.path());
        config.tool_locations[0].expected = "/usr/local/bin/python".into();
        let mut runner = ScriptedRunner::new();
        let mut ui = MockUI::new();

        let err = {
            let mut installer = Installer::new(&mut runner, &mut ui, &ManagersConfig::default());
            MachineRunner::new(&config)
                .run(&mut installer, &MachineOptions::default(), &path_with(bin.path()))
                .unwrap_err()
        };

        assert_eq!(err.exit_code(), 1);
        assert!(ui.has_error("Python environment is not configured properly"));
        assert!(!runner.was_called("brew install mercurial"));
    }

    #[test]
    fn mixed_manager_list_keeps_declared_order() {
        let bin = tool_dir();
        let mut config = config_for(bin.path());
        config.bootstrap.clear();
        config.packages = vec![
            PackageSpec::new(ManagerKind::Brew, "git"),
            PackageSpec::new(ManagerKind::Gem, "json"),
            PackageSpec::new(ManagerKind::Brew, "ack"),
        ];
        let mut runner = ScriptedRunner::new();
        let mut ui = MockUI::new();

        {
            let mut installer = Installer::new(&mut runner, &mut ui, &ManagersConfig::default());
            MachineRunner::new(&config)
                .run(&mut installer, &MachineOptions::default(), &path_with(bin.path()))
                .unwrap();
        }

        let installs: Vec<_> = runner
            .calls()
            .iter()
            .filter(|c| c.contains(" install "))
            .cloned()
            .collect();
        assert_eq!(
            installs,
            ["brew install git", "gem install json", "brew install ack"]
        );
        let package_headers: Vec<_> = ui
            .headers()
            .iter()
            .filter(|h| h.ends_with("packages..."))
            .cloned()
            .collect();
        assert_eq!(
            package_headers,
            [
                "Installing BREW packages...",
                "Installing GEM packages...",
                "Installing BREW packages...",
            ]
        );
    }

    #[test]
    fn sdk_step_runs_when_enabled() {
        let bin = tool_dir();
        let mut config = config_for(bin.path());
        config.sdk.enabled = true;
        config.sdk.floor = 19;
        config.sdk.legacy.clear();
        let mut runner = ScriptedRunner::new();
        runner.succeed_with(
            "android list sdk --all --extended",
            "\"android-19\" \"build-tools-23.0.1\"",
        );
        let mut ui = MockUI::new();

        {
            let mut installer = Installer::new(&mut runner, &mut ui, &ManagersConfig::default());
            MachineRunner::new(&config)
                .run(&mut installer, &MachineOptions::default(), &path_with(bin.path()))
                .unwrap();
        }

        assert!(runner.was_called("android update sdk --no-ui --all --filter android-19"));
        assert_eq!(
            runner.calls().last().unwrap(),
            "android update sdk --no-ui --all --filter build-tools-23.0.1"
        );
    }

    #[test]
    fn skip_sdk_option_skips_listing() {
        let bin = tool_dir();
        let mut config = config_for(bin.path());
        config.sdk.enabled = true;
        let mut runner = ScriptedRunner::new();
        let mut ui = MockUI::new();

        {
            let mut installer = Installer::new(&mut runner, &mut ui, &ManagersConfig::default());
            MachineRunner::new(&config)
                .run(
                    &mut installer,
                    &MachineOptions { skip_sdk: true },
                    &path_with(bin.path()),
                )
                .unwrap();
        }

        assert!(!runner.was_called("android list sdk --all --extended"));
    }
}

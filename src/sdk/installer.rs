//! Discover and install SDK components.

use crate::config::SdkConfig;
use crate::error::{ProvisionError, Result};
use crate::install::{InstallReport, Installer, StepOutcome};
use crate::shell::{CommandRunner, Invocation};
use crate::ui::UserInterface;

use super::discovery::{DiscoveredSdk, SdkListing};
use super::plan::{plan_components, SdkPlan};

/// Run the listing command and parse it.
///
/// # Errors
///
/// `CommandFailed` when the listing command fails, `SdkDiscovery` when a
/// marker is missing from its output.
pub fn discover(
    sdk: &SdkConfig,
    runner: &mut dyn CommandRunner,
    ui: &mut dyn UserInterface,
) -> Result<DiscoveredSdk> {
    let invocation =
        Invocation::from_argv(&sdk.list_command).ok_or_else(|| ProvisionError::ConfigValidationError {
            message: "SDK list command is empty".to_string(),
        })?;

    let mut spinner = ui.start_spinner("Listing available SDK components...");
    let result = runner.capture(&invocation)?;

    if !result.success {
        spinner.finish_error("Could not list SDK components");
        ui.show_error_block(&invocation.to_string(), result.stderr.trim_end(), None);
        return Err(ProvisionError::CommandFailed {
            command: invocation.to_string(),
            code: result.exit_code,
        });
    }

    let listing = SdkListing::parse(&result.stdout, &sdk.api_marker, &sdk.build_tools_marker)?;
    match listing.require() {
        Ok(discovered) => {
            spinner.finish_success(&format!(
                "Found API level {} and build tools {}",
                discovered.max_api_level, discovered.build_tools
            ));
            Ok(discovered)
        }
        Err(e) => {
            spinner.finish_error("SDK listing has no usable versions");
            Err(e)
        }
    }
}

/// Discover the plan, warning when no API levels fall in range.
pub fn plan(sdk: &SdkConfig, installer: &mut Installer<'_>) -> Result<SdkPlan> {
    let discovered = {
        let (runner, ui) = installer.parts();
        discover(sdk, runner, ui)?
    };
    let plan = plan_components(sdk, &discovered);

    if plan.empty_api_range {
        installer.ui().warning(&format!(
            "SDK floor {} is above the highest available API level {}; no API levels will be installed",
            sdk.floor, discovered.max_api_level
        ));
    }

    Ok(plan)
}

/// Install each planned component with `install_command + [component]`.
pub fn install_components(
    sdk: &SdkConfig,
    plan: &SdkPlan,
    installer: &mut Installer<'_>,
) -> Result<InstallReport> {
    let prefix =
        Invocation::from_argv(&sdk.install_command).ok_or_else(|| ProvisionError::ConfigValidationError {
            message: "SDK install command is empty".to_string(),
        })?;

    let mut report = InstallReport::default();
    for component in &plan.components {
        let invocation = prefix.clone().arg(component);
        match installer.run_step(&invocation, sdk.policy)? {
            StepOutcome::Succeeded => report.installed.push(component.clone()),
            StepOutcome::Skipped { code } => report.skipped.push((component.clone(), code)),
        }
    }

    Ok(report)
}

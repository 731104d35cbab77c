//! Preflight checks run before anything is changed.
//!
//! Every failure here is fatal: the remedy is printed and the run stops
//! with exit code 1. There is no prompt.

use std::ffi::OsStr;
use std::path::PathBuf;

use crate::config::{PreflightConfig, ToolLocation};
use crate::error::{ProvisionError, Result};
use crate::shell::CommandRunner;
use crate::ui::UserInterface;

use super::path_order::path_order_ok;
use super::probe::{resolve_tool_path, run_probe};

/// Run every probe and the PATH order check.
///
/// Probes run in order; the first failure stops the run.
pub fn run_preflight(
    config: &PreflightConfig,
    path_value: &OsStr,
    runner: &mut dyn CommandRunner,
    ui: &mut dyn UserInterface,
) -> Result<()> {
    for probe in &config.probes {
        let mut spinner = ui.start_spinner(&format!("Checking {}...", probe.name));
        let outcome = run_probe(runner, probe)?;

        if !outcome.passed {
            spinner.finish_error(&format!("{} not found", probe.name));
            if ui.output_mode().shows_command_output() && !outcome.detail.is_empty() {
                ui.message(&outcome.detail);
            }
            return Err(fail(ui, &probe.name, &probe.remedy));
        }

        let line = format!("{} {}", probe.name, outcome.version.unwrap_or_default());
        spinner.finish_success(line.trim_end());
    }

    if let Some(order) = &config.path_order {
        if !path_order_ok(path_value, &order.first, &order.second) {
            let fallback = format!("{} must come before {} in PATH", order.first, order.second);
            let remedy = if order.remedy.is_empty() {
                fallback.as_str()
            } else {
                order.remedy.as_str()
            };
            return Err(fail(ui, "PATH order", remedy));
        }
        tracing::debug!(first = %order.first, second = %order.second, "PATH order ok");
    }

    Ok(())
}

/// Check that each tool resolves on PATH to its expected location.
pub fn verify_tool_locations(
    locations: &[ToolLocation],
    path_entries: &[PathBuf],
    ui: &mut dyn UserInterface,
) -> Result<()> {
    for location in locations {
        let resolved = resolve_tool_path(&location.tool, path_entries);
        tracing::debug!(tool = %location.tool, resolved = ?resolved, "Resolved tool");

        if resolved.as_deref() != Some(location.expected.as_path()) {
            let found = resolved
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "nothing".to_string());
            let fallback = format!(
                "{} resolves to {}, expected {}",
                location.tool,
                found,
                location.expected.display()
            );
            let remedy = if location.remedy.is_empty() {
                fallback.as_str()
            } else {
                location.remedy.as_str()
            };
            return Err(fail(ui, &location.tool, remedy));
        }
    }

    Ok(())
}

fn fail(ui: &mut dyn UserInterface, check: &str, remedy: &str) -> ProvisionError {
    ui.error(remedy);
    ProvisionError::PreflightFailed {
        check: check.to_string(),
        message: remedy.lines().next().unwrap_or_default().to_string(),
    }
}

//! Version probes and PATH lookups.

use std::path::{Path, PathBuf};

use crate::config::ProbeConfig;
use crate::error::{ProvisionError, Result};
use crate::shell::{CommandRunner, Invocation};

/// Result of running one probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    /// Probe name.
    pub name: String,
    /// Exit code was 0.
    pub passed: bool,
    /// First non-empty output line on success.
    pub version: Option<String>,
    /// Captured error output on failure.
    pub detail: String,
}

/// Run a probe command, capturing its output.
///
/// Exit 0 passes. Any other exit, or a program that cannot be started,
/// fails.
pub fn run_probe(runner: &mut dyn CommandRunner, probe: &ProbeConfig) -> Result<ProbeOutcome> {
    let invocation =
        Invocation::from_argv(&probe.command).ok_or_else(|| ProvisionError::ConfigValidationError {
            message: format!("Probe '{}' has an empty command", probe.name),
        })?;

    let result = runner.capture(&invocation)?;
    tracing::debug!(probe = %probe.name, code = ?result.exit_code, "Probe finished");

    if result.success {
        Ok(ProbeOutcome {
            name: probe.name.clone(),
            passed: true,
            version: first_line(&result.stdout).or_else(|| first_line(&result.stderr)),
            detail: String::new(),
        })
    } else {
        Ok(ProbeOutcome {
            name: probe.name.clone(),
            passed: false,
            version: None,
            detail: result.stderr.trim().to_string(),
        })
    }
}

/// First non-empty line, trimmed. `java -version` reports on stderr.
pub fn first_line(output: &str) -> Option<String> {
    output
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// Resolve a tool's binary path by iterating over PATH entries.
///
/// Returns the first match that exists and is executable.
pub fn resolve_tool_path(tool: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    path_entries
        .iter()
        .map(|dir| dir.join(tool))
        .find(|candidate| candidate.is_file() && is_executable(candidate))
}

/// Split a PATH value into entries.
pub fn split_path_value(path_value: &std::ffi::OsStr) -> Vec<PathBuf> {
    std::env::split_paths(path_value).collect()
}

//! Error types for provisioning runs.
//!
//! This module defines [`ProvisionError`], the primary error type used
//! throughout the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Preflight failures are always fatal and exit with status 1
//! - Install failures carry the child's exit code so the process can
//!   terminate with it (fatal policy or operator abort)
//! - Use `anyhow::Error` (via `ProvisionError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for provisioning operations.
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// Referenced template does not exist.
    #[error("Unknown template: {name}")]
    UnknownTemplate { name: String },

    /// A prompt could not be answered.
    #[error("Cannot answer prompt '{key}': {message}")]
    PromptUnanswered { key: String, message: String },

    /// A preflight check failed. Never recoverable.
    #[error("Preflight check '{check}' failed: {message}")]
    PreflightFailed { check: String, message: String },

    /// An install with the fatal policy exited non-zero.
    #[error("Install failed with exit code {code:?}: {command}")]
    InstallFailed { command: String, code: Option<i32> },

    /// The operator chose to abort after a failed install.
    #[error("Aborted after failure of: {command}")]
    Aborted { command: String, code: Option<i32> },

    /// The SDK listing did not contain the expected marker.
    #[error("SDK listing has no entries matching '{marker}'")]
    SdkDiscovery { marker: String },

    /// A command whose output is required failed.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ProvisionError {
    /// Process exit code for this error.
    ///
    /// Install failures and aborts propagate the child's exit code; every
    /// other error exits with 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InstallFailed { code, .. } | Self::Aborted { code, .. } => {
                exit_status_byte(*code)
            }
            _ => 1,
        }
    }
}

/// Convert a child exit code to a process exit status.
///
/// Codes outside `1..=255` (including termination by signal) become 1 so a
/// failure never exits with 0.
pub fn exit_status_byte(code: Option<i32>) -> u8 {
    match code {
        Some(c) if (1..=255).contains(&c) => c as u8,
        _ => 1,
    }
}

/// Result type alias for provisioning operations.
pub type Result<T> = std::result::Result<T, ProvisionError>;

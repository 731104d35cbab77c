//! Configuration validation rules.
//!
//! This module validates configuration for correctness:
//! - Commands (probes, managers, captures, role commands) must be non-empty
//! - The PATH ordering check must name two directories
//! - The SDK floor must be at least 1
//! - Role files must name an existing template

use crate::config::schema::ProvisionConfig;
use crate::error::{ProvisionError, Result};
use crate::install::ManagerKind;
use crate::writer::TemplateStore;

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
    /// Role name if error is role-specific
    pub role: Option<String>,
}

impl ValidationError {
    fn new(rule: &str, message: String) -> Self {
        Self {
            rule: rule.to_string(),
            message,
            role: None,
        }
    }

    fn in_role(rule: &str, role: &str, message: String) -> Self {
        Self {
            rule: rule.to_string(),
            message,
            role: Some(role.to_string()),
        }
    }
}

/// Validate a configuration and return all errors.
///
/// This function collects all validation errors rather than stopping
/// at the first one, allowing users to fix multiple issues at once.
pub fn validate_config(config: &ProvisionConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    errors.extend(validate_preflight(config));
    errors.extend(validate_managers(config));
    errors.extend(validate_sdk(config));
    errors.extend(validate_roles(config));

    errors
}

fn validate_preflight(config: &ProvisionConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for probe in &config.preflight.probes {
        if probe.command.is_empty() {
            errors.push(ValidationError::new(
                "empty-command",
                format!("Probe '{}' has an empty command", probe.name),
            ));
        }
    }

    if let Some(order) = &config.preflight.path_order {
        if order.first.trim().is_empty() || order.second.trim().is_empty() {
            errors.push(ValidationError::new(
                "path-order",
                "PATH order check needs both 'first' and 'second' directories".to_string(),
            ));
        }
    }

    for location in &config.tool_locations {
        if location.tool.trim().is_empty() {
            errors.push(ValidationError::new(
                "empty-tool",
                format!(
                    "Tool location '{}' has an empty tool name",
                    location.expected.display()
                ),
            ));
        }
    }

    errors
}

fn validate_managers(config: &ProvisionConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for manager in ManagerKind::ALL {
        if config.managers.install_command(manager).is_empty() {
            errors.push(ValidationError::new(
                "empty-command",
                format!("Install command for '{}' is empty", manager),
            ));
        }
    }

    let housekeeping = &config.package_manager;
    if !housekeeping.taps.is_empty() && housekeeping.tap.is_empty() {
        errors.push(ValidationError::new(
            "empty-command",
            "Taps are listed but the tap command is empty".to_string(),
        ));
    }
    for (name, command) in [("doctor", &housekeeping.doctor), ("update", &housekeeping.update)] {
        if matches!(command, Some(argv) if argv.is_empty()) {
            errors.push(ValidationError::new(
                "empty-command",
                format!("Package manager '{}' command is empty", name),
            ));
        }
    }

    for package in config.bootstrap.iter().chain(&config.packages) {
        if package.name.trim().is_empty() {
            errors.push(ValidationError::new(
                "empty-package",
                format!("A '{}' package has an empty name", package.manager),
            ));
        }
    }

    errors
}

fn validate_sdk(config: &ProvisionConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let sdk = &config.sdk;

    if sdk.floor < 1 {
        errors.push(ValidationError::new(
            "sdk-floor",
            format!("SDK floor must be at least 1, got {}", sdk.floor),
        ));
    }
    if sdk.list_command.is_empty() || sdk.install_command.is_empty() {
        errors.push(ValidationError::new(
            "empty-command",
            "SDK list and install commands must not be empty".to_string(),
        ));
    }
    if sdk.api_marker.is_empty() || sdk.build_tools_marker.is_empty() {
        errors.push(ValidationError::new(
            "sdk-marker",
            "SDK markers must not be empty".to_string(),
        ));
    }

    errors
}

fn validate_roles(config: &ProvisionConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let templates = TemplateStore::from_config(config);

    for (name, role) in &config.roles {
        for capture in &role.captures {
            if capture.name.trim().is_empty() || capture.command.is_empty() {
                errors.push(ValidationError::in_role(
                    "empty-capture",
                    name,
                    format!("Role '{}' has a capture without a name or command", name),
                ));
            }
        }

        for command in &role.commands {
            if command.run.is_empty() {
                errors.push(ValidationError::in_role(
                    "empty-command",
                    name,
                    format!("Role '{}' has an empty command", name),
                ));
            }
        }

        for file in &role.files {
            if !templates.exists(&file.template) {
                errors.push(ValidationError::in_role(
                    "unknown-template",
                    name,
                    format!(
                        "Role '{}' writes {} from template '{}' which does not exist",
                        name, file.path, file.template
                    ),
                ));
            }
        }
    }

    errors
}

/// Validate and return Result (for convenience).
///
/// # Errors
///
/// Returns `ConfigValidationError` if any validation rules fail.
pub fn validate(config: &ProvisionConfig) -> Result<()> {
    let errors = validate_config(config);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(ProvisionError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}

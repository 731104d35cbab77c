//! Package managers and package specs.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::ManagersConfig;
use crate::error::{ProvisionError, Result};
use crate::shell::Invocation;

/// The package managers a package list can target.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ManagerKind {
    /// System package manager.
    Brew,
    /// Python package installer.
    Pip,
    /// Ruby gem installer.
    Gem,
}

impl ManagerKind {
    /// All managers in install order.
    pub const ALL: [ManagerKind; 3] = [Self::Brew, Self::Pip, Self::Gem];

    /// Lowercase name as used in config files.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Brew => "brew",
            Self::Pip => "pip",
            Self::Gem => "gem",
        }
    }
}

impl fmt::Display for ManagerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One package to install: `prefix + [name] + args`.
///
/// Lists are ordered and may contain duplicates; a duplicate simply
/// reinstalls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PackageSpec {
    /// Which manager installs it.
    pub manager: ManagerKind,

    /// Package name.
    pub name: String,

    /// Extra arguments appended after the name.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
}

impl PackageSpec {
    /// Create a spec with no extra arguments.
    pub fn new(manager: ManagerKind, name: &str) -> Self {
        Self {
            manager,
            name: name.to_string(),
            args: Vec::new(),
        }
    }

    /// Add extra arguments.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Build the install invocation for this package.
    ///
    /// # Errors
    ///
    /// Returns `ConfigValidationError` if the manager's install command is empty.
    pub fn invocation(&self, managers: &ManagersConfig) -> Result<Invocation> {
        let prefix = managers.install_command(self.manager);
        let invocation =
            Invocation::from_argv(prefix).ok_or_else(|| ProvisionError::ConfigValidationError {
                message: format!("Install command for '{}' is empty", self.manager),
            })?;

        Ok(self
            .args
            .iter()
            .fold(invocation.arg(&self.name), |inv, arg| inv.arg(arg)))
    }
}

impl fmt::Display for PackageSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brew_invocation_uses_install_prefix() {
        let spec = PackageSpec::new(ManagerKind::Brew, "git");
        let inv = spec.invocation(&ManagersConfig::default()).unwrap();
        assert_eq!(inv.to_string(), "brew install git");
    }

    #[test]
    fn extra_args_follow_the_name() {
        let spec = PackageSpec::new(ManagerKind::Pip, "PEAK-Rules")
            .with_args(["--pre", "--allow-unverified", "PEAK-Rules"]);
        let inv = spec.invocation(&ManagersConfig::default()).unwrap();
        assert_eq!(
            inv.to_string(),
            "pip install PEAK-Rules --pre --allow-unverified PEAK-Rules"
        );
    }

    #[test]
    fn overridden_prefix_is_used() {
        let managers = ManagersConfig {
            gem: vec!["sudo".into(), "gem".into(), "install".into()],
            ..Default::default()
        };
        let inv = PackageSpec::new(ManagerKind::Gem, "json")
            .invocation(&managers)
            .unwrap();
        assert_eq!(inv.program, "sudo");
        assert_eq!(inv.args, ["gem", "install", "json"]);
    }

    #[test]
    fn empty_prefix_is_an_error() {
        let managers = ManagersConfig {
            brew: Vec::new(),
            ..Default::default()
        };
        let result = PackageSpec::new(ManagerKind::Brew, "git").invocation(&managers);
        assert!(matches!(
            result,
            Err(ProvisionError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn spec_parses_from_yaml() {
        let spec: PackageSpec =
            serde_yaml::from_str("manager: pip\nname: pycrypto==2.6\n").unwrap();
        assert_eq!(spec.manager, ManagerKind::Pip);
        assert!(spec.args.is_empty());
    }
}

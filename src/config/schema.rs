//! Configuration schema definitions.
//!
//! This module contains all the struct definitions that map to
//! the YAML configuration file format.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::install::{InstallPolicy, ManagerKind, PackageSpec};

/// Root configuration structure for config.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ProvisionConfig {
    /// Checks run before anything is changed
    pub preflight: PreflightConfig,

    /// Package-manager housekeeping (doctor, taps, update)
    pub package_manager: PackageManagerConfig,

    /// Install command prefix per manager
    pub managers: ManagersConfig,

    /// Runtimes installed with the fatal policy before anything else
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bootstrap: Vec<PackageSpec>,

    /// Where bootstrap tools must resolve on PATH
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tool_locations: Vec<ToolLocation>,

    /// Package list installed with the prompt policy
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub packages: Vec<PackageSpec>,

    /// Android SDK component discovery
    pub sdk: SdkConfig,

    /// Access-token storage
    pub credentials: CredentialsConfig,

    /// Directory searched for templates before the built-in set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub templates_dir: Option<PathBuf>,

    /// Opt-in roles for `provision panda`
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub roles: BTreeMap<String, RoleConfig>,
}

/// Preflight checks.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PreflightConfig {
    /// Version probes that must exit 0
    pub probes: Vec<ProbeConfig>,

    /// PATH ordering requirement
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_order: Option<PathOrderConfig>,
}

/// A probe command such as `brew --version`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ProbeConfig {
    /// Display name
    pub name: String,

    /// Command argv
    pub command: Vec<String>,

    /// Shown when the probe fails
    #[serde(default)]
    pub remedy: String,
}

/// `first` must appear before `second` in PATH.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PathOrderConfig {
    /// Directory that must come first
    pub first: String,

    /// Directory that must come later
    pub second: String,

    /// Shown when the order is wrong
    #[serde(default)]
    pub remedy: String,
}

/// Package-manager housekeeping run before installs.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PackageManagerConfig {
    /// Health check command (`brew doctor`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctor: Option<Vec<String>>,

    /// Tap command prefix; each tap is appended
    pub tap: Vec<String>,

    /// Taps to add, in order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub taps: Vec<String>,

    /// Update command (`brew update`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update: Option<Vec<String>>,

    /// Failure handling for housekeeping commands
    pub policy: InstallPolicy,
}

impl Default for PackageManagerConfig {
    fn default() -> Self {
        Self {
            doctor: None,
            tap: argv(&["brew", "tap"]),
            taps: Vec::new(),
            update: None,
            policy: InstallPolicy::Prompt,
        }
    }
}

/// Install command prefix per manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ManagersConfig {
    /// System packages
    pub brew: Vec<String>,
    /// Python packages
    pub pip: Vec<String>,
    /// Ruby gems
    pub gem: Vec<String>,
}

impl Default for ManagersConfig {
    fn default() -> Self {
        Self {
            brew: argv(&["brew", "install"]),
            pip: argv(&["pip", "install"]),
            gem: argv(&["gem", "install"]),
        }
    }
}

impl ManagersConfig {
    /// The install command prefix for a manager.
    pub fn install_command(&self, manager: ManagerKind) -> &[String] {
        match manager {
            ManagerKind::Brew => &self.brew,
            ManagerKind::Pip => &self.pip,
            ManagerKind::Gem => &self.gem,
        }
    }
}

/// A tool that must resolve on PATH to an expected location.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ToolLocation {
    /// Tool name looked up on PATH
    pub tool: String,

    /// Required resolved path
    pub expected: PathBuf,

    /// Shown when the tool resolves elsewhere
    #[serde(default)]
    pub remedy: String,
}

/// Android SDK component discovery and install.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SdkConfig {
    /// Run SDK installation as part of `provision machine`
    pub enabled: bool,

    /// Command that lists available components
    pub list_command: Vec<String>,

    /// Command prefix that installs one component
    pub install_command: Vec<String>,

    /// Marker preceding API levels in the listing
    pub api_marker: String,

    /// Marker preceding build-tools versions in the listing
    pub build_tools_marker: String,

    /// Lowest API level to install
    pub floor: u32,

    /// Components installed before the API levels
    pub baseline: Vec<String>,

    /// Components installed last
    pub legacy: Vec<String>,

    /// Failure handling for component installs
    pub policy: InstallPolicy,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            list_command: argv(&["android", "list", "sdk", "--all", "--extended"]),
            install_command: argv(&["android", "update", "sdk", "--no-ui", "--all", "--filter"]),
            api_marker: "android-".to_string(),
            build_tools_marker: "build-tools-".to_string(),
            floor: 7,
            baseline: argv(&["tools", "platform-tools"]),
            legacy: Vec::new(),
            policy: InstallPolicy::Prompt,
        }
    }
}

/// Where access tokens are stored between runs.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CredentialsConfig {
    /// YAML file keyed by hostname (`~` is expanded)
    pub hosts_file: String,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            hosts_file: "~/.provision/hosts.yml".to_string(),
        }
    }
}

/// An opt-in bundle of captures, commands, packages and files.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RoleConfig {
    /// Printed when the role starts
    pub description: String,

    /// Commands whose trimmed stdout becomes a template variable
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub captures: Vec<CaptureConfig>,

    /// Commands run in order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<RoleCommand>,

    /// Packages installed with the prompt policy
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub packages: Vec<PackageSpec>,

    /// Files rendered from templates
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<RoleFile>,
}

/// A command whose output becomes a variable.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CaptureConfig {
    /// Variable name
    pub name: String,

    /// Command argv
    pub command: Vec<String>,
}

/// A role command; `${var}` is expanded in `run` and `cwd`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RoleCommand {
    /// Command argv
    pub run: Vec<String>,

    /// Working directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<String>,

    /// Failure handling
    #[serde(default)]
    pub policy: InstallPolicy,
}

/// A file written from a template.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RoleFile {
    /// Target path (`~` is expanded)
    pub path: String,

    /// Template name
    pub template: String,

    /// Host whose access token is exposed as `${token}`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_host: Option<String>,

    /// Mark the file executable
    #[serde(default, skip_serializing_if = "is_false")]
    pub executable: bool,
}

fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

fn is_false(b: &bool) -> bool {
    !*b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_uses_defaults() {
        let config: ProvisionConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.managers, ManagersConfig::default());
        assert!(config.sdk.enabled);
        assert_eq!(config.sdk.floor, 7);
        assert_eq!(config.credentials.hosts_file, "~/.provision/hosts.yml");
        assert!(config.roles.is_empty());
    }

    #[test]
    fn parses_role_with_files_and_commands() {
        let yaml = r#"
roles:
  kiln:
    description: Setting up SCM for Kiln
    files:
      - path: ~/.hgrc
        template: hgrc
        token_host: example.kilnhg.com
    commands:
      - run: [git, checkout, agent]
        cwd: "${home}/panda"
        policy: silent
"#;
        let config: ProvisionConfig = serde_yaml::from_str(yaml).unwrap();
        let role = &config.roles["kiln"];
        assert_eq!(role.files[0].template, "hgrc");
        assert_eq!(role.files[0].token_host.as_deref(), Some("example.kilnhg.com"));
        assert!(!role.files[0].executable);
        assert_eq!(role.commands[0].policy, InstallPolicy::Silent);
        assert_eq!(role.commands[0].cwd.as_deref(), Some("${home}/panda"));
    }

    #[test]
    fn command_policy_defaults_to_prompt() {
        let cmd: RoleCommand = serde_yaml::from_str("run: [brew, unlink, android-ndk]").unwrap();
        assert_eq!(cmd.policy, InstallPolicy::Prompt);
    }

    #[test]
    fn install_command_per_manager() {
        let managers = ManagersConfig::default();
        assert_eq!(managers.install_command(ManagerKind::Pip), ["pip", "install"]);
    }
}

//! Configuration file discovery and loading.
//!
//! Resolution order (first match wins):
//! 1. An explicit `--config` path
//! 2. The user config at `~/.provision/config.yml`
//! 3. The built-in default embedded in the binary

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::defaults::{builtin_config, BUILTIN_CONFIG_PATH};
use crate::config::schema::ProvisionConfig;
use crate::config::validator::validate;
use crate::error::{ProvisionError, Result};

/// Where the configuration in effect came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Passed with `--config`.
    Explicit(PathBuf),
    /// Found at `~/.provision/config.yml`.
    User(PathBuf),
    /// Embedded default.
    Builtin,
}

impl ConfigSource {
    /// Path to show in messages.
    pub fn display_path(&self) -> PathBuf {
        match self {
            Self::Explicit(p) | Self::User(p) => p.clone(),
            Self::Builtin => PathBuf::from(BUILTIN_CONFIG_PATH),
        }
    }
}

/// The user's config path: ~/.provision/config.yml
pub fn user_config_path() -> Option<PathBuf> {
    Some(dirs::home_dir()?.join(".provision").join("config.yml"))
}

/// Decide which config source to use.
pub fn discover(config_override: Option<&Path>, user_path: Option<PathBuf>) -> ConfigSource {
    if let Some(path) = config_override {
        return ConfigSource::Explicit(path.to_path_buf());
    }

    match user_path {
        Some(path) if path.is_file() => ConfigSource::User(path),
        _ => ConfigSource::Builtin,
    }
}

/// Load a configuration file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<ProvisionConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ProvisionError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ProvisionError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse configuration from a YAML string.
///
/// An empty document yields the all-defaults configuration.
pub fn parse_config(content: &str, source_path: &Path) -> Result<ProvisionConfig> {
    if content.trim().is_empty() {
        return Ok(ProvisionConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| ProvisionError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load the built-in configuration.
pub fn load_builtin() -> Result<ProvisionConfig> {
    parse_config(builtin_config()?, Path::new(BUILTIN_CONFIG_PATH))
}

/// Load and validate configuration from a source.
pub fn load_from(source: &ConfigSource) -> Result<ProvisionConfig> {
    let config = match source {
        ConfigSource::Explicit(path) | ConfigSource::User(path) => load_config_file(path)?,
        ConfigSource::Builtin => load_builtin()?,
    };

    validate(&config)?;
    tracing::debug!(source = %source.display_path().display(), "Loaded configuration");
    Ok(config)
}

/// Resolve, load and validate the configuration in effect.
///
/// # Errors
///
/// Returns `ConfigNotFound` if an explicit path doesn't exist, and
/// `ConfigParseError` or `ConfigValidationError` for bad content.
pub fn load_config(config_override: Option<&Path>) -> Result<(ProvisionConfig, ConfigSource)> {
    let source = discover(config_override, user_config_path());
    let config = load_from(&source)?;
    Ok((config, source))
}

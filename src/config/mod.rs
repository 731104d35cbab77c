//! Configuration loading, parsing, and validation.
//!
//! This module handles all aspects of configuration:
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - The embedded default config and templates in [`defaults`]
//! - Validation in [`validator`]
//! - Variable interpolation in [`interpolation`]
//!
//! # Example
//!
//! ```
//! use provision::config::{load_config_file, validate};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let path = temp.path().join("config.yml");
//! fs::write(&path, "packages:\n  - { manager: brew, name: git }\n").unwrap();
//!
//! let config = load_config_file(&path).unwrap();
//! validate(&config).unwrap();
//! assert_eq!(config.packages[0].name, "git");
//! ```
//!
//! # Configuration File Locations
//!
//! The first of these is used:
//! 1. The `--config` path
//! 2. User config (`~/.provision/config.yml`)
//! 3. The built-in default

pub mod defaults;
pub mod interpolation;
pub mod loader;
pub mod schema;
pub mod validator;

// Schema re-exports
pub use schema::{
    CaptureConfig, CredentialsConfig, ManagersConfig, PackageManagerConfig, PathOrderConfig,
    PreflightConfig, ProbeConfig, ProvisionConfig, RoleCommand, RoleConfig, RoleFile, SdkConfig,
    ToolLocation,
};

// Loader re-exports
pub use loader::{
    discover, load_builtin, load_config, load_config_file, load_from, parse_config,
    user_config_path, ConfigSource,
};

// Defaults re-exports
pub use defaults::{builtin_template, builtin_template_names};

// Validator re-exports
pub use validator::{validate, validate_config, ValidationError};

// Interpolation re-exports
pub use interpolation::{
    parse_interpolation, resolve_string, InterpolationContext, Segment,
};

//! Built-in configuration and templates embedded at compile time.

use include_dir::{include_dir, Dir};
use std::path::{Path, PathBuf};

use crate::error::{ProvisionError, Result};

/// Embedded defaults directory.
static DEFAULTS_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/defaults");

/// Display path used in errors about the built-in config.
pub const BUILTIN_CONFIG_PATH: &str = "<built-in>/config.yml";

/// The built-in configuration file contents.
pub fn builtin_config() -> Result<&'static str> {
    embedded_utf8(Path::new("config.yml"))
}

/// A built-in template by name, if one exists.
pub fn builtin_template(name: &str) -> Option<&'static str> {
    DEFAULTS_DIR
        .get_file(Path::new("templates").join(name))
        .and_then(|f| f.contents_utf8())
}

/// Names of all built-in templates, sorted.
pub fn builtin_template_names() -> Vec<String> {
    let mut names: Vec<String> = DEFAULTS_DIR
        .get_dir("templates")
        .map(|dir| {
            dir.files()
                .filter_map(|f| f.path().file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}

fn embedded_utf8(path: &Path) -> Result<&'static str> {
    let file = DEFAULTS_DIR
        .get_file(path)
        .ok_or_else(|| ProvisionError::ConfigNotFound {
            path: PathBuf::from(BUILTIN_CONFIG_PATH),
        })?;

    file.contents_utf8()
        .ok_or_else(|| ProvisionError::ConfigParseError {
            path: PathBuf::from(BUILTIN_CONFIG_PATH),
            message: "Invalid UTF-8".to_string(),
        })
}

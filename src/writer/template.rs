//! Template lookup and rendering.

use std::fs;
use std::path::PathBuf;

use crate::config::defaults::builtin_template;
use crate::config::{resolve_string, InterpolationContext, ProvisionConfig};
use crate::error::{ProvisionError, Result};
use crate::shell::home_dir;

use super::files::expand_home;

/// Finds templates in the configured directory, then the built-in set.
#[derive(Debug, Clone, Default)]
pub struct TemplateStore {
    dir: Option<PathBuf>,
}

impl TemplateStore {
    /// Create a store searching `dir` before the built-ins.
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self { dir }
    }

    /// Create a store from the config's `templates_dir`.
    pub fn from_config(config: &ProvisionConfig) -> Self {
        let dir = config
            .templates_dir
            .as_ref()
            .map(|d| expand_home(&d.to_string_lossy(), &home_dir()));
        Self::new(dir)
    }

    fn custom_path(&self, name: &str) -> Option<PathBuf> {
        self.dir
            .as_ref()
            .map(|d| d.join(name))
            .filter(|p| p.is_file())
    }

    /// Whether a template with this name exists.
    pub fn exists(&self, name: &str) -> bool {
        self.custom_path(name).is_some() || builtin_template(name).is_some()
    }

    /// Load a template's text.
    ///
    /// # Errors
    ///
    /// Returns `UnknownTemplate` if neither location has it.
    pub fn load(&self, name: &str) -> Result<String> {
        if let Some(path) = self.custom_path(name) {
            tracing::debug!(template = name, path = %path.display(), "Using custom template");
            return Ok(fs::read_to_string(path)?);
        }

        builtin_template(name)
            .map(str::to_string)
            .ok_or_else(|| ProvisionError::UnknownTemplate {
                name: name.to_string(),
            })
    }
}

/// Render a template. Unknown variables are an error.
pub fn render(template: &str, ctx: &InterpolationContext) -> Result<String> {
    resolve_string(template, ctx)
}

//! Config command implementation.
//!
//! The `provision config` command shows the resolved configuration or its
//! JSON Schema.

use std::path::{Path, PathBuf};

use crate::cli::args::ConfigArgs;
use crate::config::{load_config, ProvisionConfig};
use crate::error::{ProvisionError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The config command implementation.
pub struct ConfigCommand {
    config_path: Option<PathBuf>,
    args: ConfigArgs,
}

impl ConfigCommand {
    /// Create a new config command.
    pub fn new(config_path: Option<&Path>, args: ConfigArgs) -> Self {
        Self {
            config_path: config_path.map(Path::to_path_buf),
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ConfigArgs {
        &self.args
    }
}

impl Command for ConfigCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if self.args.schema {
            let schema = schemars::schema_for!(ProvisionConfig);
            let json = serde_json::to_string_pretty(&schema)
                .map_err(|e| ProvisionError::Other(e.into()))?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        let (config, source) = load_config(self.config_path.as_deref())?;

        if self.args.json {
            let json = serde_json::to_string_pretty(&config)
                .map_err(|e| ProvisionError::Other(e.into()))?;
            ui.message(&json);
        } else {
            let yaml =
                serde_yaml::to_string(&config).map_err(|e| ProvisionError::Other(e.into()))?;
            ui.message(&format!("# {}", source.display_path().display()));
            ui.message(&yaml);
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(content: &str) -> (TempDir, PathBuf) {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        fs::write(&path, content).unwrap();
        (temp, path)
    }

    #[test]
    fn shows_config_path_and_yaml() {
        let (_temp, path) = write_config("packages:\n  - { manager: gem, name: json }\n");
        let cmd = ConfigCommand::new(Some(&path), ConfigArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert_eq!(ui.messages()[0], format!("# {}", path.display()));
        assert!(ui.has_message("name: json"));
    }

    #[test]
    fn json_output_parses() {
        let (_temp, path) = write_config("sdk:\n  floor: 19\n");
        let cmd = ConfigCommand::new(
            Some(&path),
            ConfigArgs {
                json: true,
                schema: false,
            },
        );
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        let value: serde_json::Value = serde_json::from_str(&ui.messages()[0]).unwrap();
        assert_eq!(value["sdk"]["floor"], 19);
    }

    #[test]
    fn schema_describes_sections() {
        let cmd = ConfigCommand::new(
            None,
            ConfigArgs {
                json: false,
                schema: true,
            },
        );
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        let schema: serde_json::Value = serde_json::from_str(&ui.messages()[0]).unwrap();
        assert!(schema["properties"]["roles"].is_object());
        assert!(schema["properties"]["sdk"].is_object());
    }

    #[test]
    fn bad_yaml_is_a_parse_error() {
        let (_temp, path) = write_config("packages: [unclosed");
        let cmd = ConfigCommand::new(Some(&path), ConfigArgs::default());
        let mut ui = MockUI::new();

        let err = cmd.execute(&mut ui).unwrap_err();
        assert!(matches!(err, ProvisionError::ConfigParseError { .. }));
    }
}

//! Failure-handling policy for installs and commands.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What to do when an install exits non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum InstallPolicy {
    /// Print the error and terminate with the child's exit code.
    Fatal,
    /// Print the error and ask the operator whether to continue.
    #[default]
    Prompt,
    /// Print the error and continue.
    Silent,
}

impl InstallPolicy {
    /// Apply `--quiet`: prompting becomes silent, fatal stays fatal.
    pub fn quieted(self, quiet: bool) -> Self {
        match self {
            Self::Prompt if quiet => Self::Silent,
            other => other,
        }
    }
}

impl fmt::Display for InstallPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fatal => "fatal",
            Self::Prompt => "prompt",
            Self::Silent => "silent",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for InstallPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fatal" => Ok(Self::Fatal),
            "prompt" => Ok(Self::Prompt),
            "silent" => Ok(Self::Silent),
            _ => Err(format!("unknown install policy: {}", s)),
        }
    }
}

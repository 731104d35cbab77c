//! Access tokens for source-control hosts.
//!
//! Tokens come from a YAML hosts file keyed by hostname:
//!
//! ```yaml
//! github.com:
//!   token: 0123abcd
//! ```
//!
//! Other keys in a host's entry are ignored. A host missing from the file is asked for once per run.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use crate::error::{ProvisionError, Result};
use crate::ui::{Prompt, PromptType, UserInterface};

/// One host's credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostEntry {
    /// Access token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Parsed hosts file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HostsFile {
    hosts: BTreeMap<String, HostEntry>,
}

impl HostsFile {
    /// Load a hosts file. A missing file is an empty one.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content, path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No hosts file");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Parse hosts file content.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| ProvisionError::ConfigParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// The stored, non-empty token for a host.
    pub fn token(&self, host: &str) -> Option<&str> {
        self.hosts
            .get(host)
            .and_then(|h| h.token.as_deref())
            .filter(|t| !t.trim().is_empty())
    }
}

/// Resolves tokens from the hosts file or the operator, at most once per host.
#[derive(Debug, Default)]
pub struct TokenResolver {
    hosts: HostsFile,
    resolved: HashMap<String, Option<String>>,
}

impl TokenResolver {
    /// Create a resolver backed by a hosts file.
    pub fn new(hosts: HostsFile) -> Self {
        Self {
            hosts,
            resolved: HashMap::new(),
        }
    }

    /// Token for `host`, or `None` when the operator left it empty.
    pub fn token(&mut self, host: &str, ui: &mut dyn UserInterface) -> Result<Option<String>> {
        if let Some(cached) = self.resolved.get(host) {
            return Ok(cached.clone());
        }

        let token = match self.hosts.token(host) {
            Some(token) => {
                tracing::debug!(host, "Token found in hosts file");
                Some(token.to_string())
            }
            None => {
                let prompt = Prompt {
                    key: format!("token_{}", host),
                    question: format!("{} access token", host),
                    prompt_type: PromptType::Secret,
                    default: Some(String::new()),
                };
                let answer = ui.prompt(&prompt)?.as_string();
                let trimmed = answer.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
        };

        self.resolved.insert(host.to_string(), token.clone());
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    const HOSTS: &str = r#"
github.com:
  token: gh-token
  user: dev
backflipstudios.kilnhg.com:
  user: dev
"#;

    #[test]
    fn parses_hosts_file() {
        let hosts = HostsFile::parse(HOSTS, Path::new("hosts.yml")).unwrap();
        assert_eq!(hosts.token("github.com"), Some("gh-token"));
        assert_eq!(hosts.token("backflipstudios.kilnhg.com"), None);
        assert_eq!(hosts.token("example.com"), None);
    }

    #[test]
    fn missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let hosts = HostsFile::load(&temp.path().join("hosts.yml")).unwrap();
        assert_eq!(hosts, HostsFile::default());
    }

    #[test]
    fn invalid_file_is_a_parse_error() {
        let result = HostsFile::parse("github.com: [", Path::new("hosts.yml"));
        assert!(matches!(result, Err(ProvisionError::ConfigParseError { .. })));
    }

    #[test]
    fn file_token_skips_prompt() {
        let hosts = HostsFile::parse(HOSTS, Path::new("hosts.yml")).unwrap();
        let mut resolver = TokenResolver::new(hosts);
        let mut ui = MockUI::new();

        let token = resolver.token("github.com", &mut ui).unwrap();
        assert_eq!(token.as_deref(), Some("gh-token"));
        assert!(ui.prompts_shown().is_empty());
    }

    #[test]
    fn prompts_once_per_host() {
        let mut resolver = TokenResolver::default();
        let mut ui = MockUI::new();
        ui.set_prompt_response("token_backflipstudios.kilnhg.com", " kiln-token \n");

        let first = resolver
            .token("backflipstudios.kilnhg.com", &mut ui)
            .unwrap();
        let second = resolver
            .token("backflipstudios.kilnhg.com", &mut ui)
            .unwrap();

        assert_eq!(first.as_deref(), Some("kiln-token"));
        assert_eq!(first, second);
        assert_eq!(ui.prompts_shown().len(), 1);
    }

    #[test]
    fn empty_answer_is_none_and_cached() {
        let mut resolver = TokenResolver::default();
        let mut ui = MockUI::new();
        ui.set_prompt_response("token_github.com", "");

        assert_eq!(resolver.token("github.com", &mut ui).unwrap(), None);
        assert_eq!(resolver.token("github.com", &mut ui).unwrap(), None);
        assert_eq!(ui.prompts_shown().len(), 1);
    }
}

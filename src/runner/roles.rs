//! Opt-in roles for `provision panda`.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::{resolve_string, InterpolationContext, ProvisionConfig, RoleConfig};
use crate::error::{ProvisionError, Result};
use crate::install::{InstallPolicy, InstallReport, Installer};
use crate::shell::Invocation;
use crate::writer::{expand_home, render, write_file, TemplateStore, TokenResolver};

/// The roles a `panda` run can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    /// Shell profile.
    Environment,
    /// Mercurial and git credentials for Kiln.
    Kiln,
    /// Github token for Homebrew.
    Github,
    /// Editor package and configuration.
    Emacs,
    /// Build agent support.
    Agent,
    /// Bamboo support.
    Bamboo,
    /// Web support.
    Web,
}

impl Role {
    /// Every role in run order.
    pub const ALL: [Role; 7] = [
        Self::Environment,
        Self::Kiln,
        Self::Github,
        Self::Emacs,
        Self::Agent,
        Self::Bamboo,
        Self::Web,
    ];

    /// Key of this role in the config's `roles` table.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Environment => "environment",
            Self::Kiln => "kiln",
            Self::Github => "github",
            Self::Emacs => "emacs",
            Self::Agent => "agent",
            Self::Bamboo => "bamboo",
            Self::Web => "web",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.name() == s.to_lowercase())
            .ok_or_else(|| format!("unknown role: {}", s))
    }
}

/// Runs roles against a configuration.
pub struct RoleRunner<'a> {
    config: &'a ProvisionConfig,
    templates: TemplateStore,
    tokens: TokenResolver,
    home: PathBuf,
    env: HashMap<String, String>,
}

impl<'a> RoleRunner<'a> {
    /// Create a runner. `env` is exposed to templates and commands.
    pub fn new(
        config: &'a ProvisionConfig,
        tokens: TokenResolver,
        home: PathBuf,
        env: HashMap<String, String>,
    ) -> Self {
        Self {
            config,
            templates: TemplateStore::from_config(config),
            tokens,
            home,
            env,
        }
    }

    /// Run the selected roles in the fixed order, whatever order they were given in.
    pub fn run_roles(&mut self, roles: &[Role], installer: &mut Installer<'_>) -> Result<InstallReport> {
        let mut report = InstallReport::default();

        for role in Role::ALL.into_iter().filter(|r| roles.contains(r)) {
            report.merge(self.run_role(role.name(), installer)?);
        }

        if report.has_failures() {
            installer.ui().warning(&format!(
                "{} item(s) failed and were skipped",
                report.skipped.len()
            ));
        }

        Ok(report)
    }

    /// Run one role by its config key.
    pub fn run_role(&mut self, name: &str, installer: &mut Installer<'_>) -> Result<InstallReport> {
        let config = self.config;
        let role = config
            .roles
            .get(name)
            .ok_or_else(|| ProvisionError::ConfigValidationError {
                message: format!("Role '{}' is not configured", name),
            })?;

        let title = if role.description.is_empty() {
            name
        } else {
            role.description.as_str()
        };
        installer.ui().show_header(title);
        tracing::debug!(role = name, "Running role");

        let mut ctx = InterpolationContext::new()
            .with_home(&self.home)
            .with_env(self.env.clone());

        self.run_captures(role, &mut ctx, installer)?;
        self.run_commands(role, &ctx, installer)?;
        let report = installer.install_all(&role.packages, InstallPolicy::Prompt)?;
        self.write_files(role, &ctx, installer)?;

        Ok(report)
    }

    fn run_captures(
        &self,
        role: &RoleConfig,
        ctx: &mut InterpolationContext,
        installer: &mut Installer<'_>,
    ) -> Result<()> {
        for capture in &role.captures {
            let invocation = self.invocation(&capture.command, None, ctx)?;
            let result = installer.runner().capture(&invocation)?;

            if !result.success {
                installer
                    .ui()
                    .show_error_block(&invocation.to_string(), result.stderr.trim_end(), None);
                return Err(ProvisionError::CommandFailed {
                    command: invocation.to_string(),
                    code: result.exit_code,
                });
            }

            let value = result.stdout.trim().to_string();
            tracing::debug!(name = %capture.name, %value, "Captured variable");
            ctx.set(&capture.name, value);
        }

        Ok(())
    }

    fn run_commands(
        &self,
        role: &RoleConfig,
        ctx: &InterpolationContext,
        installer: &mut Installer<'_>,
    ) -> Result<()> {
        for command in &role.commands {
            let invocation = self.invocation(&command.run, command.cwd.as_deref(), ctx)?;
            installer.run_step(&invocation, command.policy)?;
        }

        Ok(())
    }

    fn write_files(
        &mut self,
        role: &RoleConfig,
        ctx: &InterpolationContext,
        installer: &mut Installer<'_>,
    ) -> Result<()> {
        for file in &role.files {
            let mut file_ctx = ctx.clone();

            if let Some(host) = &file.token_host {
                match self.tokens.token(host, installer.ui())? {
                    Some(token) => file_ctx.set("token", token),
                    None => {
                        installer.ui().warning(&format!(
                            "No access token for {}; skipping {}",
                            host, file.path
                        ));
                        continue;
                    }
                }
            }

            let template = self.templates.load(&file.template)?;
            let content = render(&template, &file_ctx)?;
            let path = expand_home(&file.path, &self.home);
            write_file(&path, &content, file.executable)?;
            installer.ui().success(&format!("Wrote {}", file.path));
        }

        Ok(())
    }

    fn invocation(
        &self,
        argv: &[String],
        cwd: Option<&str>,
        ctx: &InterpolationContext,
    ) -> Result<Invocation> {
        let resolved = argv
            .iter()
            .map(|arg| resolve_string(arg, ctx))
            .collect::<Result<Vec<_>>>()?;

        let mut invocation =
            Invocation::from_argv(&resolved).ok_or_else(|| ProvisionError::ConfigValidationError {
                message: "Role command is empty".to_string(),
            })?;

        if let Some(dir) = cwd {
            let dir = resolve_string(dir, ctx)?;
            invocation = invocation.in_dir(expand_home(&dir, &self.home));
        }

        Ok(invocation)
    }
}

//! The command-running seam used by preflight, installers and roles.

use crate::error::Result;

use super::command::{execute, CommandOptions, CommandResult, Invocation};

/// Runs external commands.
///
/// Production code uses [`SystemRunner`]; tests use
/// [`ScriptedRunner`](super::ScriptedRunner) to simulate exit codes.
pub trait CommandRunner {
    /// Run a command with stdout passed through and stderr captured.
    fn run(&mut self, invocation: &Invocation) -> Result<CommandResult>;

    /// Run a command capturing both stdout and stderr.
    fn capture(&mut self, invocation: &Invocation) -> Result<CommandResult>;
}

/// Runs commands as real child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    /// Create a new system runner.
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    fn run(&mut self, invocation: &Invocation) -> Result<CommandResult> {
        execute(invocation, CommandOptions::stderr_only())
    }

    fn capture(&mut self, invocation: &Invocation) -> Result<CommandResult> {
        execute(invocation, CommandOptions::captured())
    }
}

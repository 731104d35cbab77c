//! Scripted command runner for testing.
//!
//! `ScriptedRunner` implements [`CommandRunner`] without spawning
//! processes. Responses are keyed by the rendered command line
//! (`"brew install git"`); anything unscripted succeeds with empty output.
//!
//! # Example
//!
//! ```
//! use provision::shell::{CommandRunner, Invocation, ScriptedRunner};
//!
//! let mut runner = ScriptedRunner::new();
//! runner.fail("brew install git", 1, "Error: No available formula");
//!
//! let result = runner.run(&Invocation::new("brew", ["install", "git"])).unwrap();
//! assert_eq!(result.exit_code, Some(1));
//! assert_eq!(runner.calls(), ["brew install git"]);
//! ```

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use crate::error::Result;

use super::command::{CommandResult, Invocation};
use super::runner::CommandRunner;

/// Command runner returning pre-configured results.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    responses: HashMap<String, VecDeque<CommandResult>>,
    calls: Vec<String>,
    invocations: Vec<Invocation>,
}

impl ScriptedRunner {
    /// Create a runner where every command succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful result with the given stdout.
    pub fn succeed_with(&mut self, command: &str, stdout: &str) {
        self.push(
            command,
            CommandResult::success(stdout.to_string(), String::new(), Duration::ZERO),
        );
    }

    /// Queue a failed result with the given exit code and stderr.
    pub fn fail(&mut self, command: &str, code: i32, stderr: &str) {
        self.push(
            command,
            CommandResult::failure(Some(code), String::new(), stderr.to_string(), Duration::ZERO),
        );
    }

    /// Queue an arbitrary result.
    ///
    /// Results for the same command are returned in order; once the queue
    /// is down to one entry, that entry repeats.
    pub fn push(&mut self, command: &str, result: CommandResult) {
        self.responses
            .entry(command.to_string())
            .or_default()
            .push_back(result);
    }

    /// Command lines run so far, in order.
    pub fn calls(&self) -> &[String] {
        &self.calls
    }

    /// Full invocations run so far, in order.
    pub fn invocations(&self) -> &[Invocation] {
        &self.invocations
    }

    /// Check whether a command line was run.
    pub fn was_called(&self, command: &str) -> bool {
        self.calls.iter().any(|c| c == command)
    }

    fn respond(&mut self, invocation: &Invocation) -> CommandResult {
        let key = invocation.to_string();
        self.calls.push(key.clone());
        self.invocations.push(invocation.clone());

        match self.responses.get_mut(&key) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap_or_else(ok_result),
            Some(queue) => queue.front().cloned().unwrap_or_else(ok_result),
            None => ok_result(),
        }
    }
}

fn ok_result() -> CommandResult {
    CommandResult::success(String::new(), String::new(), Duration::ZERO)
}

impl CommandRunner for ScriptedRunner {
    fn run(&mut self, invocation: &Invocation) -> Result<CommandResult> {
        Ok(self.respond(invocation))
    }

    fn capture(&mut self, invocation: &Invocation) -> Result<CommandResult> {
        Ok(self.respond(invocation))
    }
}

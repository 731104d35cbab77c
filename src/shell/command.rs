//! External command execution.

use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use crate::error::Result;

/// Exit code reported when a program cannot be spawned at all.
pub const NOT_FOUND_EXIT_CODE: i32 = 127;

/// A program invocation: argv plus an optional working directory.
///
/// Programs are spawned directly, never through a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program name or path.
    pub program: String,
    /// Arguments after the program.
    pub args: Vec<String>,
    /// Working directory (inherits the current one when `None`).
    pub cwd: Option<PathBuf>,
}

impl Invocation {
    /// Create an invocation from a program and its arguments.
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
            cwd: None,
        }
    }

    /// Build an invocation from a full argv. Returns `None` for an empty argv.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self::new(program, args.iter().cloned()))
    }

    /// Set the working directory.
    pub fn in_dir(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Append an argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " {:?}", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Result of executing a command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output (empty when not captured).
    pub stdout: String,

    /// Standard error (empty when not captured).
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }

    /// Result for a program that could not be started.
    pub fn not_found(program: &str, reason: &str) -> Self {
        Self::failure(
            Some(NOT_FOUND_EXIT_CODE),
            String::new(),
            format!("{}: {}", program, reason),
            Duration::ZERO,
        )
    }

    /// Result for an invocation whose working directory does not exist.
    pub fn missing_dir(dir: &Path) -> Self {
        Self::failure(
            Some(1),
            String::new(),
            format!("working directory {} does not exist", dir.display()),
            Duration::ZERO,
        )
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandOptions {
    /// Capture stdout (if false, inherits from parent).
    pub capture_stdout: bool,

    /// Capture stderr (if false, inherits from parent).
    pub capture_stderr: bool,
}

impl CommandOptions {
    /// Capture both streams.
    pub fn captured() -> Self {
        Self {
            capture_stdout: true,
            capture_stderr: true,
        }
    }

    /// Let stdout through to the terminal but keep stderr for error reports.
    pub fn stderr_only() -> Self {
        Self {
            capture_stdout: false,
            capture_stderr: true,
        }
    }
}

/// Execute an invocation and wait for it to exit.
///
/// A program that cannot be spawned is reported as a failed result with
/// exit code [`NOT_FOUND_EXIT_CODE`] rather than an error, so callers can
/// classify it like any other failure. A missing working directory fails
/// with exit code 1 before anything is spawned.
pub fn execute(invocation: &Invocation, options: CommandOptions) -> Result<CommandResult> {
    if let Some(cwd) = invocation.cwd.as_deref().filter(|dir| !dir.is_dir()) {
        tracing::debug!("Working directory missing for {}: {}", invocation, cwd.display());
        return Ok(CommandResult::missing_dir(cwd));
    }

    let start = Instant::now();

    let mut cmd = Command::new(&invocation.program);
    cmd.args(&invocation.args);

    if let Some(cwd) = &invocation.cwd {
        cmd.current_dir(cwd);
    }

    cmd.stdin(Stdio::inherit());
    if options.capture_stdout {
        cmd.stdout(Stdio::piped());
    } else {
        cmd.stdout(Stdio::inherit());
    }
    if options.capture_stderr {
        cmd.stderr(Stdio::piped());
    } else {
        cmd.stderr(Stdio::inherit());
    }

    tracing::debug!("Executing: {}", invocation);

    let output = match cmd.output() {
        Ok(output) => output,
        Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::PermissionDenied) => {
            tracing::debug!("Could not spawn {}: {}", invocation.program, e);
            return Ok(CommandResult::not_found(&invocation.program, &e.to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    let duration = start.elapsed();
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    tracing::debug!(
        "{} exited with {:?} after {:?}",
        invocation.program,
        output.status.code(),
        duration
    );

    if output.status.success() {
        Ok(CommandResult::success(stdout, stderr, duration))
    } else {
        Ok(CommandResult::failure(
            output.status.code(),
            stdout,
            stderr,
            duration,
        ))
    }
}

//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! Commands that run installs also expose a `run_with` method taking the
//! [`CommandRunner`](crate::shell::CommandRunner) explicitly.

pub mod completions;
pub mod config;
pub mod dispatcher;
pub mod machine;
pub mod panda;
pub mod sdk;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};

//! External command execution.

pub mod command;
pub mod mock;
pub mod platform;
pub mod runner;

pub use command::{
    execute, CommandOptions, CommandResult, Invocation, NOT_FOUND_EXIT_CODE,
};
pub use mock::ScriptedRunner;
pub use platform::{home_dir, is_ci};
pub use runner::{CommandRunner, SystemRunner};

//! Provision - developer machine setup.
//!
//! Provision checks a workstation's toolchain, installs packages through
//! Homebrew, pip and gem, installs Android SDK components, and writes
//! per-role configuration files. Every install goes through a single
//! install-with-recovery step whose failure policy decides between
//! stopping, asking the operator, or moving on.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, parsing, and validation
//! - [`error`] - Error types and result aliases
//! - [`install`] - Install-with-recovery and package specs
//! - [`preflight`] - Toolchain probes and PATH checks
//! - [`runner`] - Machine setup sequence and roles
//! - [`sdk`] - Android SDK discovery and component installation
//! - [`shell`] - Shell command execution
//! - [`ui`] - Interactive prompts, spinners, and terminal output
//! - [`writer`] - Templates, tokens and file writes
//!
//! # Example
//!
//! ```
//! use provision::config::{InterpolationContext, resolve_string};
//!
//! let mut ctx = InterpolationContext::new();
//! ctx.set("brew_prefix", "/usr/local");
//! let cwd = resolve_string("${brew_prefix}/Library/Taps", &ctx).unwrap();
//! assert_eq!(cwd, "/usr/local/Library/Taps");
//! ```
//!
//! For end-to-end runs, see the integration tests.

pub mod cli;
pub mod config;
pub mod error;
pub mod install;
pub mod preflight;
pub mod runner;
pub mod sdk;
pub mod shell;
pub mod ui;
pub mod writer;

pub use error::{ProvisionError, Result};

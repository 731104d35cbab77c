//! Package installation with failure recovery.
//!
//! - [`InstallPolicy`] chooses what happens when an install fails
//! - [`PackageSpec`] and [`ManagerKind`] describe what to install
//! - [`Installer`] runs installs and commands under a policy
//! - [`ask_to_continue`] is the operator decision behind the prompt policy
//!
//! # Example
//!
//! ```
//! use provision::config::ManagersConfig;
//! use provision::install::{InstallPolicy, Installer, ManagerKind, PackageSpec};
//! use provision::shell::ScriptedRunner;
//! use provision::ui::MockUI;
//!
//! let mut runner = ScriptedRunner::new();
//! runner.fail("brew install ack", 1, "Error: No available formula");
//! let mut ui = MockUI::new();
//!
//! let packages = vec![
//!     PackageSpec::new(ManagerKind::Brew, "ack"),
//!     PackageSpec::new(ManagerKind::Brew, "git"),
//! ];
//! let mut installer = Installer::new(&mut runner, &mut ui, &ManagersConfig::default());
//! let report = installer.install_all(&packages, InstallPolicy::Silent).unwrap();
//!
//! assert_eq!(report.installed, ["git"]);
//! assert_eq!(report.skipped.len(), 1);
//! ```

pub mod decision;
pub mod installer;
pub mod manager;
pub mod policy;

pub use decision::{ask_to_continue, parse_answer, Decision, CONTINUE_PROMPT_KEY};
pub use installer::{InstallReport, Installer, StepOutcome};
pub use manager::{ManagerKind, PackageSpec};
pub use policy::InstallPolicy;

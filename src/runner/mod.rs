//! Provisioning run orchestration.

pub mod machine;
pub mod roles;

pub use machine::{MachineOptions, MachineRunner};
pub use roles::{Role, RoleRunner};

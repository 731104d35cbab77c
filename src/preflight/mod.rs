//! Checks that run before any mutating step.

pub mod checker;
pub mod path_order;
pub mod probe;

pub use checker::{run_preflight, verify_tool_locations};
pub use path_order::path_order_ok;
pub use probe::{
    first_line, is_executable, resolve_tool_path, run_probe, split_path_value,
    ProbeOutcome,
};

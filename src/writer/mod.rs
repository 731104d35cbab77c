//! Rendering templates to configuration files.
//!
//! # Example
//!
//! ```
//! use provision::config::InterpolationContext;
//! use provision::writer::{render, write_file, TemplateStore};
//! use std::path::Path;
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! let ctx = InterpolationContext::new().with_home(Path::new("/Users/dev"));
//!
//! let template = TemplateStore::default().load("profile").unwrap();
//! let content = render(&template, &ctx).unwrap();
//! write_file(&temp.path().join(".profile"), &content, false).unwrap();
//!
//! assert!(content.contains("export PANDA_HOME=/Users/dev/panda"));
//! ```

pub mod files;
pub mod template;
pub mod tokens;

pub use files::{expand_home, write_file};
pub use template::{render, TemplateStore};
pub use tokens::{HostEntry, HostsFile, TokenResolver};

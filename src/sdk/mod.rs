//! Android SDK component discovery and installation.

pub mod discovery;
pub mod installer;
pub mod plan;

pub use discovery::{BuildToolsVersion, DiscoveredSdk, SdkListing};
pub use installer::{discover, install_components, plan};
pub use plan::{plan_components, SdkPlan};

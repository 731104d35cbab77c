//! Scraping the SDK component listing for available versions.

use regex::Regex;
use std::cmp::Ordering;
use std::fmt;

use crate::error::{ProvisionError, Result};

/// A dotted `major.minor.patch` build-tools version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildToolsVersion {
    parts: [u32; 3],
    text: String,
}

impl BuildToolsVersion {
    /// Numeric components.
    pub fn parts(&self) -> [u32; 3] {
        self.parts
    }
}

impl Ord for BuildToolsVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.parts.cmp(&other.parts)
    }
}

impl PartialOrd for BuildToolsVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for BuildToolsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// What a listing contained. Either value is `None` when its marker never
/// appears followed by a version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkListing {
    /// Highest integer following the API marker.
    pub max_api_level: Option<u32>,
    /// Highest version following the build-tools marker.
    pub build_tools: Option<BuildToolsVersion>,
    api_marker: String,
    build_tools_marker: String,
}

/// A listing with both values present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredSdk {
    /// Highest available API level.
    pub max_api_level: u32,
    /// Highest available build-tools version.
    pub build_tools: BuildToolsVersion,
}

impl SdkListing {
    /// Parse listing text.
    ///
    /// `"android-7"`, `"android-19"`, `"android-10"` give 19;
    /// `build-tools-23.0.1` and `build-tools-19.1.0` give `23.0.1`.
    pub fn parse(text: &str, api_marker: &str, build_tools_marker: &str) -> Result<Self> {
        let api_re = marker_regex(api_marker, r"(\d+)\b")?;
        let tools_re = marker_regex(build_tools_marker, r"(\d+)\.(\d+)\.(\d+)\b")?;

        let max_api_level = api_re
            .captures_iter(text)
            .filter_map(|c| c[1].parse::<u32>().ok())
            .max();

        let build_tools = tools_re
            .captures_iter(text)
            .filter_map(|c| {
                let major = c[1].parse().ok()?;
                let minor = c[2].parse().ok()?;
                let patch = c[3].parse().ok()?;
                Some(BuildToolsVersion {
                    parts: [major, minor, patch],
                    text: format!("{}.{}.{}", &c[1], &c[2], &c[3]),
                })
            })
            .max();

        tracing::debug!(?max_api_level, ?build_tools, "Parsed SDK listing");

        Ok(Self {
            max_api_level,
            build_tools,
            api_marker: api_marker.to_string(),
            build_tools_marker: build_tools_marker.to_string(),
        })
    }

    /// Both values, or an `SdkDiscovery` error naming the missing marker.
    pub fn require(&self) -> Result<DiscoveredSdk> {
        let max_api_level = self.max_api_level.ok_or_else(|| ProvisionError::SdkDiscovery {
            marker: self.api_marker.clone(),
        })?;
        let build_tools = self
            .build_tools
            .clone()
            .ok_or_else(|| ProvisionError::SdkDiscovery {
                marker: self.build_tools_marker.clone(),
            })?;

        Ok(DiscoveredSdk {
            max_api_level,
            build_tools,
        })
    }
}

fn marker_regex(marker: &str, suffix: &str) -> Result<Regex> {
    Regex::new(&format!("{}{}", regex::escape(marker), suffix))
        .map_err(|e| ProvisionError::Other(anyhow::anyhow!("invalid SDK marker '{}': {}", marker, e)))
}

//! Which SDK components to install, in order.

use crate::config::SdkConfig;

use super::discovery::DiscoveredSdk;

/// Ordered component list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkPlan {
    /// Components in install order, without duplicates.
    pub components: Vec<String>,
    /// The floor is above the discovered maximum, so no API levels are planned.
    pub empty_api_range: bool,
}

/// Baseline, then API levels `floor..=max`, then the discovered build
/// tools, then legacy components. Later duplicates are dropped.
pub fn plan_components(sdk: &SdkConfig, discovered: &DiscoveredSdk) -> SdkPlan {
    let mut components: Vec<String> = Vec::new();
    let mut push = |component: String| {
        if !components.contains(&component) {
            components.push(component);
        }
    };

    for component in &sdk.baseline {
        push(component.clone());
    }
    for level in sdk.floor..=discovered.max_api_level {
        push(format!("{}{}", sdk.api_marker, level));
    }
    push(format!("{}{}", sdk.build_tools_marker, discovered.build_tools));
    for component in &sdk.legacy {
        push(component.clone());
    }

    SdkPlan {
        components,
        empty_api_range: sdk.floor > discovered.max_api_level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::SdkListing;

    fn discovered(text: &str) -> DiscoveredSdk {
        SdkListing::parse(text, "android-", "build-tools-")
            .unwrap()
            .require()
            .unwrap()
    }

    #[test]
    fn plans_in_order() {
        let sdk = SdkConfig {
            floor: 17,
            legacy: vec!["build-tools-19.0.3".to_string()],
            ..Default::default()
        };
        let plan = plan_components(&sdk, &discovered("android-19 build-tools-23.0.1"));

        assert_eq!(
            plan.components,
            [
                "tools",
                "platform-tools",
                "android-17",
                "android-18",
                "android-19",
                "build-tools-23.0.1",
                "build-tools-19.0.3",
            ]
        );
        assert!(!plan.empty_api_range);
    }

    #[test]
    fn floor_above_max_plans_no_levels() {
        let sdk = SdkConfig {
            floor: 21,
            ..Default::default()
        };
        let plan = plan_components(&sdk, &discovered("android-19 build-tools-23.0.1"));

        assert!(plan.empty_api_range);
        assert!(!plan.components.iter().any(|c| c.starts_with("android-")));
        assert!(plan.components.contains(&"build-tools-23.0.1".to_string()));
    }

    #[test]
    fn duplicates_keep_first_position() {
        let sdk = SdkConfig {
            floor: 19,
            legacy: vec!["build-tools-23.0.1".to_string(), "tools".to_string()],
            ..Default::default()
        };
        let plan = plan_components(&sdk, &discovered("android-19 build-tools-23.0.1"));

        assert_eq!(
            plan.components,
            ["tools", "platform-tools", "android-19", "build-tools-23.0.1"]
        );
    }
}

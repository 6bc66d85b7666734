use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Tier-determined capabilities. Names match the dashboard's feature keys.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Feature {
    #[serde(rename = "hasAdvancedReporting")]
    AdvancedReporting,
    #[serde(rename = "hasNotifications")]
    Notifications,
    #[serde(rename = "hasCRM")]
    Crm,
    #[serde(rename = "hasAPI")]
    Api,
    #[serde(rename = "hasCustomLogo")]
    CustomLogo,
    #[serde(rename = "hasWhiteLabel")]
    WhiteLabel,
    #[serde(rename = "hasDedicatedSupport")]
    DedicatedSupport,
    #[serde(rename = "hasIntegrations")]
    Integrations,
}

impl Feature {
    pub const ALL: [Feature; 8] = [
        Feature::AdvancedReporting,
        Feature::Notifications,
        Feature::Crm,
        Feature::Api,
        Feature::CustomLogo,
        Feature::WhiteLabel,
        Feature::DedicatedSupport,
        Feature::Integrations,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::AdvancedReporting => "hasAdvancedReporting",
            Feature::Notifications => "hasNotifications",
            Feature::Crm => "hasCRM",
            Feature::Api => "hasAPI",
            Feature::CustomLogo => "hasCustomLogo",
            Feature::WhiteLabel => "hasWhiteLabel",
            Feature::DedicatedSupport => "hasDedicatedSupport",
            Feature::Integrations => "hasIntegrations",
        }
    }

    /// Unknown names map to `None`; callers treat that as "not granted".
    pub fn from_name(name: &str) -> Option<Self> {
        Feature::ALL.into_iter().find(|feature| feature.as_str() == name)
    }
}

impl Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

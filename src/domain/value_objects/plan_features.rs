use serde::{Deserialize, Serialize};

use crate::domain::value_objects::enums::{features::Feature, plan_tiers::PlanTier};

/// Capabilities unlocked by a tier. Never customised per company.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlanFeatures {
    pub has_advanced_reporting: bool,
    pub has_notifications: bool,
    #[serde(rename = "hasCRM")]
    pub has_crm: bool,
    #[serde(rename = "hasAPI")]
    pub has_api: bool,
    pub has_custom_logo: bool,
    pub has_white_label: bool,
    pub has_dedicated_support: bool,
    pub has_integrations: bool,
}

impl PlanFeatures {
    pub fn for_tier(tier: PlanTier) -> Self {
        match tier {
            PlanTier::Decouverte => Self::default(),
            PlanTier::Essentiel => Self {
                has_notifications: true,
                has_custom_logo: true,
                ..Self::default()
            },
            PlanTier::Pro => Self {
                has_advanced_reporting: true,
                has_notifications: true,
                has_crm: true,
                has_custom_logo: true,
                has_integrations: true,
                ..Self::default()
            },
            PlanTier::Premium => Self {
                has_advanced_reporting: true,
                has_notifications: true,
                has_crm: true,
                has_api: true,
                has_custom_logo: true,
                has_white_label: true,
                has_dedicated_support: true,
                has_integrations: true,
            },
        }
    }

    pub fn get(&self, feature: Feature) -> bool {
        match feature {
            Feature::AdvancedReporting => self.has_advanced_reporting,
            Feature::Notifications => self.has_notifications,
            Feature::Crm => self.has_crm,
            Feature::Api => self.has_api,
            Feature::CustomLogo => self.has_custom_logo,
            Feature::WhiteLabel => self.has_white_label,
            Feature::DedicatedSupport => self.has_dedicated_support,
            Feature::Integrations => self.has_integrations,
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{
    enums::plan_tiers::PlanTier, plan_features::PlanFeatures, plan_limits::PlanLimits,
};

/// Plan snapshot handed to every gating decision for one company.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlanData {
    pub tier: PlanTier,
    pub name: String,
    pub features: PlanFeatures,
    /// An upgrade to PRO/PREMIUM is waiting for manual approval.
    pub quote_pending: bool,
    /// Tier named in the pending quote request.
    #[serde(default)]
    pub requested_tier: Option<PlanTier>,
    pub is_active: bool,
}

impl PlanData {
    pub fn for_tier(tier: PlanTier, quote_pending: bool, is_active: bool) -> Self {
        Self {
            tier,
            name: tier.display_name().to_string(),
            features: PlanFeatures::for_tier(tier),
            quote_pending,
            requested_tier: None,
            is_active,
        }
    }

    pub fn limits(&self) -> PlanLimits {
        PlanLimits::for_tier(self.tier)
    }
}

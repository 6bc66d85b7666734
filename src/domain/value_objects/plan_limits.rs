use serde::{Deserialize, Serialize};

use crate::domain::value_objects::enums::{plan_tiers::PlanTier, resource_types::ResourceType};

/// Per-tier resource caps. `None` is unlimited, `Some(0)` means the resource
/// is not available at the tier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlanLimits {
    pub max_events: Option<u32>,
    pub max_participants: Option<u32>,
    pub max_vehicles: Option<u32>,
}

impl PlanLimits {
    pub fn for_tier(tier: PlanTier) -> Self {
        match tier {
            PlanTier::Decouverte => Self {
                max_events: Some(2),
                max_participants: Some(50),
                max_vehicles: Some(0),
            },
            PlanTier::Essentiel => Self {
                max_events: Some(10),
                max_participants: Some(200),
                max_vehicles: Some(50),
            },
            PlanTier::Pro => Self {
                max_events: Some(50),
                max_participants: Some(1000),
                max_vehicles: Some(250),
            },
            PlanTier::Premium => Self {
                max_events: None,
                max_participants: None,
                max_vehicles: None,
            },
        }
    }

    pub fn get(&self, resource: ResourceType) -> Option<u32> {
        match resource {
            ResourceType::Events => self.max_events,
            ResourceType::Participants => self.max_participants,
            ResourceType::Vehicles => self.max_vehicles,
        }
    }
}

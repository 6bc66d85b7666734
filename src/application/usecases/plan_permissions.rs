//! Pure access decisions over the static plan tables.
//!
//! Nothing here performs I/O; the same functions back the dashboard API and
//! the server-side enforcement path.

use thiserror::Error;

use crate::domain::value_objects::{
    enums::{features::Feature, plan_tiers::PlanTier, resource_types::ResourceType},
    plan_data::PlanData,
    plan_features::PlanFeatures,
    plan_limits::PlanLimits,
    quota::ResourceDecision,
};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PermissionError {
    #[error("invalid resource count for {resource}: {count}")]
    InvalidCount { resource: ResourceType, count: i64 },
}

pub fn has_sufficient_plan(user_tier: PlanTier, required_tier: Option<PlanTier>) -> bool {
    match required_tier {
        Some(required) => user_tier.rank() >= required.rank(),
        None => true,
    }
}

pub fn get_limit(tier: PlanTier, resource: ResourceType) -> Option<u32> {
    PlanLimits::for_tier(tier).get(resource)
}

pub fn can_add_resource(
    tier: PlanTier,
    resource: ResourceType,
    current_count: i64,
) -> Result<ResourceDecision, PermissionError> {
    if current_count < 0 {
        return Err(PermissionError::InvalidCount {
            resource,
            count: current_count,
        });
    }

    let limit = get_limit(tier, resource);
    let decision = match limit {
        None => ResourceDecision {
            can_add: true,
            limit,
            reason: None,
        },
        Some(0) => ResourceDecision {
            can_add: false,
            limit,
            reason: Some(format!(
                "{} are not available on the {} plan (feature unavailable at this tier)",
                resource,
                tier.display_name()
            )),
        },
        Some(max) if current_count >= i64::from(max) => ResourceDecision {
            can_add: false,
            limit,
            reason: Some(format!(
                "Quota reached: the {} plan allows at most {} {}",
                tier.display_name(),
                max,
                resource
            )),
        },
        Some(_) => ResourceDecision {
            can_add: true,
            limit,
            reason: None,
        },
    };

    Ok(decision)
}

/// Unknown feature names are never granted.
pub fn has_feature(tier: PlanTier, feature_name: &str) -> bool {
    Feature::from_name(feature_name)
        .map(|feature| PlanFeatures::for_tier(tier).get(feature))
        .unwrap_or(false)
}

/// Feature check against the loaded plan; no plan data denies everything.
pub fn has_plan_feature(plan: Option<&PlanData>, feature_name: &str) -> bool {
    let Some(plan) = plan else {
        return false;
    };

    Feature::from_name(feature_name)
        .map(|feature| plan.features.get(feature))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sufficient_plan_compares_ranks() {
        assert!(has_sufficient_plan(PlanTier::Pro, Some(PlanTier::Essentiel)));
        assert!(has_sufficient_plan(PlanTier::Pro, Some(PlanTier::Pro)));
        assert!(!has_sufficient_plan(PlanTier::Essentiel, Some(PlanTier::Premium)));
        assert!(has_sufficient_plan(PlanTier::Decouverte, None));
    }

    #[test]
    fn decouverte_events_quota_reached_at_two() {
        let decision = can_add_resource(PlanTier::Decouverte, ResourceType::Events, 2).unwrap();
        assert!(!decision.can_add);
        assert_eq!(decision.limit, Some(2));
        assert!(decision.reason.unwrap().contains('2'));
    }

    #[test]
    fn essentiel_can_add_the_fiftieth_vehicle() {
        let decision = can_add_resource(PlanTier::Essentiel, ResourceType::Vehicles, 49).unwrap();
        assert!(decision.can_add);
        assert_eq!(decision.limit, Some(50));
        assert_eq!(decision.reason, None);
    }

    #[test]
    fn zero_limit_means_unavailable() {
        let decision = can_add_resource(PlanTier::Decouverte, ResourceType::Vehicles, 0).unwrap();
        assert!(!decision.can_add);
        assert!(decision.reason.unwrap().contains("feature unavailable"));
    }

    #[test]
    fn unlimited_always_allows() {
        let decision =
            can_add_resource(PlanTier::Premium, ResourceType::Participants, 1_000_000).unwrap();
        assert!(decision.can_add);
        assert_eq!(decision.limit, None);
    }

    #[test]
    fn negative_count_is_rejected() {
        let err = can_add_resource(PlanTier::Pro, ResourceType::Events, -1).unwrap_err();
        assert_eq!(
            err,
            PermissionError::InvalidCount {
                resource: ResourceType::Events,
                count: -1
            }
        );
    }

    #[test]
    fn crm_starts_at_pro() {
        assert!(has_feature(PlanTier::Pro, "hasCRM"));
        assert!(!has_feature(PlanTier::Essentiel, "hasCRM"));
    }

    #[test]
    fn unknown_feature_is_denied() {
        assert!(!has_feature(PlanTier::Premium, "hasTeleportation"));
        assert!(!has_feature(PlanTier::Premium, "hascrm"));
    }

    #[test]
    fn missing_plan_data_denies_every_feature() {
        for feature in Feature::ALL {
            assert!(!has_plan_feature(None, feature.as_str()));
        }
    }

    #[test]
    fn plan_feature_reads_loaded_flags() {
        let plan = PlanData::for_tier(PlanTier::Premium, false, true);
        assert!(has_plan_feature(Some(&plan), "hasWhiteLabel"));

        let mut pending = PlanData::for_tier(PlanTier::Essentiel, true, true);
        pending.features.has_crm = false;
        assert!(!has_plan_feature(Some(&pending), "hasCRM"));
    }
}

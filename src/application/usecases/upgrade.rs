use crate::domain::value_objects::{
    enums::{features::Feature, plan_tiers::PlanTier},
    plan_features::PlanFeatures,
};

pub fn get_next_plan(tier: PlanTier) -> Option<PlanTier> {
    tier.next()
}

/// Lowest tier whose flags include `feature`.
pub fn lowest_plan_with(feature: Feature) -> PlanTier {
    PlanTier::ALL
        .into_iter()
        .find(|tier| PlanFeatures::for_tier(*tier).get(feature))
        .unwrap_or(PlanTier::Premium)
}

/// A label that is a feature key (`hasAPI`) names the tier that grants it.
pub fn get_upgrade_message(tier: PlanTier, feature_label: &str) -> String {
    match Feature::from_name(feature_label) {
        Some(feature) => get_feature_upgrade_message(tier, feature, feature_label),
        None => next_plan_message(tier, feature_label),
    }
}

pub fn get_feature_upgrade_message(
    tier: PlanTier,
    feature: Feature,
    feature_label: &str,
) -> String {
    let required = lowest_plan_with(feature);
    if required > tier {
        format!(
            "{} is available from the {} plan. Upgrade to unlock it.",
            feature_label,
            required.display_name()
        )
    } else {
        next_plan_message(tier, feature_label)
    }
}

fn next_plan_message(tier: PlanTier, feature_label: &str) -> String {
    match get_next_plan(tier) {
        Some(next) => format!(
            "{} is available from the {} plan. Upgrade to unlock it.",
            feature_label,
            next.display_name()
        ),
        None => format!("{} requires a higher plan.", feature_label),
    }
}

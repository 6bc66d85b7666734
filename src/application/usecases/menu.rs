use std::collections::HashMap;

use crate::{
    application::usecases::plan_permissions::has_sufficient_plan,
    domain::value_objects::{
        enums::plan_tiers::PlanTier,
        menu_items::{BASE_MENU, ESSENTIEL_MENU, MenuItem, PREMIUM_MENU, PRO_MENU},
        plan_features::PlanFeatures,
    },
};

/// Builds the navigation for a tier.
///
/// Sections are appended lowest tier first, then entries sharing a URL are
/// collapsed: the last-inserted entry wins and takes the slot of the first
/// occurrence. When `features` is given, entries whose required flag is unset
/// are dropped even if the tier qualifies. Flags are derived from the tier
/// alone (a pending quote grants nothing), so with a resolved `PlanData` the
/// filter only bites on snapshots narrower than the tier defaults.
pub fn get_menu_items_for_plan(tier: PlanTier, features: Option<&PlanFeatures>) -> Vec<MenuItem> {
    let sections = [
        (PlanTier::Decouverte, BASE_MENU),
        (PlanTier::Essentiel, ESSENTIEL_MENU),
        (PlanTier::Pro, PRO_MENU),
        (PlanTier::Premium, PREMIUM_MENU),
    ];

    let mut items: Vec<MenuItem> = Vec::new();
    let mut slots: HashMap<&'static str, usize> = HashMap::new();

    for (required_tier, section) in sections {
        if !has_sufficient_plan(tier, Some(required_tier)) {
            continue;
        }
        for item in section {
            match slots.get(item.url) {
                Some(&slot) => items[slot] = *item,
                None => {
                    slots.insert(item.url, items.len());
                    items.push(*item);
                }
            }
        }
    }

    match features {
        Some(features) => items
            .into_iter()
            .filter(|item| {
                item.required_feature
                    .map(|feature| features.get(feature))
                    .unwrap_or(true)
            })
            .collect(),
        None => items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::enums::features::Feature;
    use std::collections::HashSet;

    fn urls(items: &[MenuItem]) -> Vec<&'static str> {
        items.iter().map(|item| item.url).collect()
    }

    #[test]
    fn decouverte_only_sees_base_items() {
        let items = get_menu_items_for_plan(PlanTier::Decouverte, None);
        assert_eq!(
            urls(&items),
            vec!["/dashboard", "/events", "/participants", "/settings"]
        );
    }

    #[test]
    fn premium_vehicles_entry_replaces_lower_variants() {
        let items = get_menu_items_for_plan(PlanTier::Premium, None);
        let vehicles: Vec<_> = items.iter().filter(|item| item.url == "/vehicles").collect();

        assert_eq!(vehicles.len(), 1);
        assert_eq!(vehicles[0].tier, PlanTier::Premium);
    }

    #[test]
    fn pro_vehicles_entry_keeps_its_menu_position() {
        let items = get_menu_items_for_plan(PlanTier::Pro, None);
        let position = items.iter().position(|item| item.url == "/vehicles");

        assert_eq!(position, Some(4));
        assert_eq!(items[4].tier, PlanTier::Pro);
    }

    #[test]
    fn urls_are_unique_for_every_tier() {
        for tier in PlanTier::ALL {
            let items = get_menu_items_for_plan(tier, None);
            let unique: HashSet<_> = items.iter().map(|item| item.url).collect();
            assert_eq!(unique.len(), items.len(), "duplicate url for {tier}");
        }
    }

    #[test]
    fn feature_filter_withholds_unset_flags() {
        let mut features = PlanFeatures::for_tier(PlanTier::Pro);
        features.has_crm = false;

        let items = get_menu_items_for_plan(PlanTier::Pro, Some(&features));

        assert!(!items.iter().any(|item| item.url == "/crm"));
        assert!(items.iter().any(|item| item.url == "/reports"));
        assert!(items.iter().any(|item| item.url == "/vehicles"));
    }

    #[test]
    fn tier_features_keep_every_tier_item() {
        for tier in PlanTier::ALL {
            let features = PlanFeatures::for_tier(tier);
            let filtered = get_menu_items_for_plan(tier, Some(&features));
            let unfiltered = get_menu_items_for_plan(tier, None);
            assert_eq!(filtered, unfiltered, "tier {tier} lost a menu entry");
        }
    }

    #[test]
    fn branding_entry_upgrades_to_white_label_on_premium() {
        let items = get_menu_items_for_plan(PlanTier::Premium, None);
        let branding = items.iter().find(|item| item.url == "/branding").unwrap();
        assert_eq!(branding.required_feature, Some(Feature::WhiteLabel));
    }
}

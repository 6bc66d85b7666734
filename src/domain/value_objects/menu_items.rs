use serde::Serialize;

use crate::domain::value_objects::enums::{features::Feature, plan_tiers::PlanTier};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub title: &'static str,
    pub url: &'static str,
    pub icon: &'static str,
    /// Tier whose menu section contributed this entry.
    pub tier: PlanTier,
    pub required_feature: Option<Feature>,
}

const fn item(
    title: &'static str,
    url: &'static str,
    icon: &'static str,
    tier: PlanTier,
    required_feature: Option<Feature>,
) -> MenuItem {
    MenuItem {
        title,
        url,
        icon,
        tier,
        required_feature,
    }
}

pub const BASE_MENU: &[MenuItem] = &[
    item("Tableau de bord", "/dashboard", "layout-dashboard", PlanTier::Decouverte, None),
    item("Événements", "/events", "calendar", PlanTier::Decouverte, None),
    item("Participants", "/participants", "users", PlanTier::Decouverte, None),
    item("Paramètres", "/settings", "settings", PlanTier::Decouverte, None),
];

pub const ESSENTIEL_MENU: &[MenuItem] = &[
    item("Véhicules", "/vehicles", "car", PlanTier::Essentiel, None),
    item(
        "Notifications",
        "/notifications",
        "bell",
        PlanTier::Essentiel,
        Some(Feature::Notifications),
    ),
    item(
        "Personnalisation",
        "/branding",
        "palette",
        PlanTier::Essentiel,
        Some(Feature::CustomLogo),
    ),
];

pub const PRO_MENU: &[MenuItem] = &[
    item("Gestion de flotte", "/vehicles", "truck", PlanTier::Pro, None),
    item(
        "Rapports avancés",
        "/reports",
        "bar-chart",
        PlanTier::Pro,
        Some(Feature::AdvancedReporting),
    ),
    item("CRM", "/crm", "contact", PlanTier::Pro, Some(Feature::Crm)),
    item(
        "Intégrations",
        "/integrations",
        "plug",
        PlanTier::Pro,
        Some(Feature::Integrations),
    ),
];

pub const PREMIUM_MENU: &[MenuItem] = &[
    item("Flotte multi-sites", "/vehicles", "truck", PlanTier::Premium, None),
    item("API", "/api-keys", "key", PlanTier::Premium, Some(Feature::Api)),
    item(
        "Marque blanche",
        "/branding",
        "badge",
        PlanTier::Premium,
        Some(Feature::WhiteLabel),
    ),
    item(
        "Support dédié",
        "/support",
        "life-buoy",
        PlanTier::Premium,
        Some(Feature::DedicatedSupport),
    ),
];

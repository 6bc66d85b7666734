use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Subscription tiers, lowest first. The derived ordering follows the rank.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum PlanTier {
    Decouverte,
    Essentiel,
    Pro,
    Premium,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown plan tier: {0}")]
pub struct UnknownPlanTier(pub String);

impl PlanTier {
    pub const ALL: [PlanTier; 4] = [
        PlanTier::Decouverte,
        PlanTier::Essentiel,
        PlanTier::Pro,
        PlanTier::Premium,
    ];

    pub fn rank(&self) -> u8 {
        match self {
            PlanTier::Decouverte => 0,
            PlanTier::Essentiel => 1,
            PlanTier::Pro => 2,
            PlanTier::Premium => 3,
        }
    }

    /// Wire value, persisted and compared as-is.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanTier::Decouverte => "DECOUVERTE",
            PlanTier::Essentiel => "ESSENTIEL",
            PlanTier::Pro => "PRO",
            PlanTier::Premium => "PREMIUM",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PlanTier::Decouverte => "Découverte",
            PlanTier::Essentiel => "Essentiel",
            PlanTier::Pro => "Pro",
            PlanTier::Premium => "Premium",
        }
    }

    pub fn next(&self) -> Option<PlanTier> {
        match self {
            PlanTier::Decouverte => Some(PlanTier::Essentiel),
            PlanTier::Essentiel => Some(PlanTier::Pro),
            PlanTier::Pro => Some(PlanTier::Premium),
            PlanTier::Premium => None,
        }
    }

    /// Upgrades to these tiers go through a manual quote instead of checkout.
    pub fn requires_quote(&self) -> bool {
        matches!(self, PlanTier::Pro | PlanTier::Premium)
    }
}

impl FromStr for PlanTier {
    type Err = UnknownPlanTier;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "DECOUVERTE" => Ok(PlanTier::Decouverte),
            "ESSENTIEL" => Ok(PlanTier::Essentiel),
            "PRO" => Ok(PlanTier::Pro),
            "PREMIUM" => Ok(PlanTier::Premium),
            _ => Err(UnknownPlanTier(value.to_string())),
        }
    }
}

impl Display for PlanTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

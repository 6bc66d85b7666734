use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Events,
    Participants,
    Vehicles,
}

impl ResourceType {
    pub const ALL: [ResourceType; 3] = [
        ResourceType::Events,
        ResourceType::Participants,
        ResourceType::Vehicles,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Events => "events",
            ResourceType::Participants => "participants",
            ResourceType::Vehicles => "vehicles",
        }
    }
}

impl FromStr for ResourceType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "events" => Ok(ResourceType::Events),
            "participants" => Ok(ResourceType::Participants),
            "vehicles" => Ok(ResourceType::Vehicles),
            _ => Err(format!("Unsupported resource type: {}", value)),
        }
    }
}

impl Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

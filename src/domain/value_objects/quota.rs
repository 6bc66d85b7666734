use serde::Serialize;

use crate::domain::value_objects::enums::{gate_modes::UsageStatus, resource_types::ResourceType};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDecision {
    pub can_add: bool,
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Progress of a company against one resource limit.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UsageSnapshot {
    pub resource: ResourceType,
    pub current_count: i64,
    pub limit: Option<u32>,
    pub percentage: Option<f64>,
    pub status: UsageStatus,
    pub decision: ResourceDecision,
}

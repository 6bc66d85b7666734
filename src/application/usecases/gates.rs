use crate::domain::value_objects::{
    enums::{
        gate_modes::{GateMode, GateOutcome, UsageStatus},
        resource_types::ResourceType,
    },
    quota::{ResourceDecision, UsageSnapshot},
};

/// Share of the limit at which the soft warning starts.
pub const NEAR_LIMIT_PERCENTAGE: f64 = 80.0;

pub fn decide_gate(has_access: bool, mode: GateMode) -> GateOutcome {
    if has_access {
        return GateOutcome::Content;
    }

    match mode {
        GateMode::Hide => GateOutcome::Nothing,
        GateMode::Block => GateOutcome::Fallback,
        GateMode::Alert => GateOutcome::ContentWithWarning,
    }
}

pub fn usage_percentage(current_count: i64, limit: Option<u32>) -> Option<f64> {
    match limit {
        None => None,
        Some(0) => Some(100.0),
        Some(max) => Some((current_count as f64 / f64::from(max) * 100.0).min(100.0)),
    }
}

/// Drives the limit guard shown next to creation buttons.
pub fn usage_snapshot(
    resource: ResourceType,
    current_count: i64,
    decision: ResourceDecision,
) -> UsageSnapshot {
    let percentage = usage_percentage(current_count, decision.limit);

    let status = if !decision.can_add {
        UsageStatus::AtLimit
    } else if percentage.is_some_and(|value| value >= NEAR_LIMIT_PERCENTAGE) {
        UsageStatus::NearLimit
    } else {
        UsageStatus::Available
    };

    UsageSnapshot {
        resource,
        current_count,
        limit: decision.limit,
        percentage,
        status,
        decision,
    }
}

use serde::{Deserialize, Serialize};

/// How a gate renders when access is denied.
#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GateMode {
    /// Render nothing.
    Hide,
    /// Render a fallback or upgrade card instead of the content.
    #[default]
    Block,
    /// Render the content behind a non-blocking warning banner.
    Alert,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GateOutcome {
    Content,
    Nothing,
    Fallback,
    ContentWithWarning,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UsageStatus {
    Available,
    NearLimit,
    AtLimit,
}

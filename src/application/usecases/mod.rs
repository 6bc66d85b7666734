pub mod gates;
pub mod menu;
pub mod plan_changes;
pub mod plan_permissions;
pub mod plan_resolver;
pub mod quota_enforcement;
pub mod upgrade;

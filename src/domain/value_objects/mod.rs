pub mod enums;
pub mod menu_items;
pub mod plan_data;
pub mod plan_features;
pub mod plan_limits;
pub mod quota;

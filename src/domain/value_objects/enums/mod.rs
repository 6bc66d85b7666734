pub mod features;
pub mod gate_modes;
pub mod plan_tiers;
pub mod resource_types;

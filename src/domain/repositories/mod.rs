pub mod companies;
pub mod resource_counters;

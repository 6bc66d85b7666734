pub mod admin_plans;
pub mod plans;

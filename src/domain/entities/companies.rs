use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::companies;

/// Plan columns of a company row. Tiers stay as raw text; parsing happens in
/// the resolver so unknown values can fail closed.
#[derive(Debug, Clone, Identifiable, Selectable, Queryable, PartialEq)]
#[diesel(table_name = companies)]
pub struct CompanyPlanEntity {
    pub id: Uuid,
    pub plan_tier: String,
    pub requested_tier: Option<String>,
    pub quote_pending: bool,
    pub plan_is_active: bool,
}

#[derive(Debug, Clone, AsChangeset, PartialEq)]
#[diesel(table_name = companies)]
pub struct CompanyPlanChangeset {
    pub plan_tier: Option<String>,
    pub requested_tier: Option<Option<String>>,
    pub quote_pending: bool,
    pub updated_at: DateTime<Utc>,
}

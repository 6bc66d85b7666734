use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    routing::put,
};
use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

use crate::{
    application::usecases::plan_changes::PlanTransition,
    domain::{
        repositories::{companies::CompanyRepository, resource_counters::ResourceCounterRepository},
        value_objects::enums::plan_tiers::PlanTier,
    },
    infrastructure::axum_http::{
        auth::AuthUser, error_responses::AppError, routers::plans::PlansState,
    },
};

#[derive(Debug, Deserialize)]
pub struct ChangePlanRequest {
    pub tier: PlanTier,
}

pub fn routes<C, R>(state: PlansState<C, R>) -> Router
where
    C: CompanyRepository + Send + Sync + 'static,
    R: ResourceCounterRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/companies/:company_id/plan", put(change_plan::<C, R>))
        .with_state(state)
}

pub async fn change_plan<C, R>(
    State(state): State<PlansState<C, R>>,
    auth: AuthUser,
    company_id: Result<Path<Uuid>, PathRejection>,
    request: Result<Json<ChangePlanRequest>, JsonRejection>,
) -> Result<Json<PlanTransition>, AppError>
where
    C: CompanyRepository + Send + Sync + 'static,
    R: ResourceCounterRepository + Send + Sync + 'static,
{
    if !auth.is_admin() {
        warn!(
            user_id = %auth.user_id,
            "admin_plans: non-admin attempted a plan change"
        );
        return Err(AppError::Forbidden(
            "Admin role required to change plans".to_string(),
        ));
    }

    let Path(company_id) = company_id?;
    let Json(request) = request?;

    let transition = state
        .plan_changes
        .apply_plan_change(company_id, request.tier)
        .await?;

    Ok(Json(transition))
}

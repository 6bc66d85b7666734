use std::{sync::Arc, time::Duration};

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    application::usecases::{
        gates::decide_gate,
        menu::get_menu_items_for_plan,
        plan_changes::{PlanChangeUseCase, UpgradePath},
        plan_permissions::has_plan_feature,
        plan_resolver::PlanResolver,
        quota_enforcement::QuotaEnforcementUseCase,
        upgrade::{
            get_feature_upgrade_message, get_next_plan, get_upgrade_message, lowest_plan_with,
        },
    },
    config::config_model::PlanCache,
    domain::{
        repositories::{companies::CompanyRepository, resource_counters::ResourceCounterRepository},
        value_objects::{
            enums::{
                features::Feature,
                gate_modes::{GateMode, GateOutcome},
                plan_tiers::PlanTier,
                resource_types::ResourceType,
            },
            menu_items::MenuItem,
            plan_data::PlanData,
            plan_limits::PlanLimits,
            quota::UsageSnapshot,
        },
    },
    infrastructure::{
        axum_http::{auth::AuthUser, error_responses::AppError},
        postgres::{
            postgres_connection::PgPoolSquad,
            repositories::{companies::CompanyPostgres, resource_counters::ResourceCounterPostgres},
        },
    },
};

/// Use cases shared by the plan and admin routers. Both must hold the same
/// resolver so plan changes invalidate the cache the readers use.
pub struct PlansState<C, R>
where
    C: CompanyRepository + Send + Sync + 'static,
    R: ResourceCounterRepository + Send + Sync + 'static,
{
    pub quota: Arc<QuotaEnforcementUseCase<C, R>>,
    pub plan_changes: Arc<PlanChangeUseCase<C>>,
    pub plan_resolver: Arc<PlanResolver<C>>,
    pub poll_interval_seconds: u64,
}

impl<C, R> Clone for PlansState<C, R>
where
    C: CompanyRepository + Send + Sync + 'static,
    R: ResourceCounterRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            quota: Arc::clone(&self.quota),
            plan_changes: Arc::clone(&self.plan_changes),
            plan_resolver: Arc::clone(&self.plan_resolver),
            poll_interval_seconds: self.poll_interval_seconds,
        }
    }
}

impl<C, R> PlansState<C, R>
where
    C: CompanyRepository + Send + Sync + 'static,
    R: ResourceCounterRepository + Send + Sync + 'static,
{
    pub fn new(company_repo: Arc<C>, counter_repo: Arc<R>, plan_cache: &PlanCache) -> Self {
        let plan_resolver = Arc::new(PlanResolver::new(
            Arc::clone(&company_repo),
            Duration::from_secs(plan_cache.ttl_seconds),
            plan_cache.max_capacity,
        ));

        Self {
            quota: Arc::new(QuotaEnforcementUseCase::new(
                Arc::clone(&plan_resolver),
                counter_repo,
            )),
            plan_changes: Arc::new(PlanChangeUseCase::new(
                company_repo,
                Arc::clone(&plan_resolver),
            )),
            plan_resolver,
            poll_interval_seconds: plan_cache.poll_interval_seconds,
        }
    }
}

pub type PostgresPlansState = PlansState<CompanyPostgres, ResourceCounterPostgres>;

pub fn postgres_state(db_pool: Arc<PgPoolSquad>, plan_cache: &PlanCache) -> PostgresPlansState {
    PlansState::new(
        Arc::new(CompanyPostgres::new(Arc::clone(&db_pool))),
        Arc::new(ResourceCounterPostgres::new(db_pool)),
        plan_cache,
    )
}

pub fn routes<C, R>(state: PlansState<C, R>) -> Router
where
    C: CompanyRepository + Send + Sync + 'static,
    R: ResourceCounterRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/current-features", get(current_features::<C, R>))
        .route("/menu", get(menu::<C, R>))
        .route("/quota/:resource", get(quota_usage::<C, R>))
        .route("/quota/:resource/enforce", post(enforce_quota::<C, R>))
        .route("/gate", get(gate::<C, R>))
        .route("/upgrade-requests", post(request_upgrade::<C, R>))
        .route("/refresh", post(refresh::<C, R>))
        .with_state(state)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentFeaturesResponse {
    pub plan: Option<PlanData>,
    pub limits: Option<PlanLimits>,
    pub poll_interval_seconds: u64,
}

#[derive(Debug, Deserialize)]
pub struct GateQuery {
    pub feature: String,
    #[serde(default)]
    pub mode: GateMode,
    pub label: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GateResponse {
    pub feature: String,
    pub has_access: bool,
    pub outcome: GateOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upgrade_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_plan: Option<PlanTier>,
    /// Lowest tier granting the feature, when the key is known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_plan: Option<PlanTier>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeRequest {
    pub target_tier: PlanTier,
}

fn parse_resource(raw: &str) -> Result<ResourceType, AppError> {
    raw.parse::<ResourceType>().map_err(AppError::BadRequest)
}

pub async fn current_features<C, R>(
    State(state): State<PlansState<C, R>>,
    auth: AuthUser,
) -> Result<Json<CurrentFeaturesResponse>, AppError>
where
    C: CompanyRepository + Send + Sync + 'static,
    R: ResourceCounterRepository + Send + Sync + 'static,
{
    let plan = state.quota.current_plan(auth.company_id).await?;

    Ok(Json(CurrentFeaturesResponse {
        limits: plan.as_ref().map(PlanData::limits),
        plan,
        poll_interval_seconds: state.poll_interval_seconds,
    }))
}

pub async fn menu<C, R>(
    State(state): State<PlansState<C, R>>,
    auth: AuthUser,
) -> Result<Json<Vec<MenuItem>>, AppError>
where
    C: CompanyRepository + Send + Sync + 'static,
    R: ResourceCounterRepository + Send + Sync + 'static,
{
    let items = match state.quota.current_plan(auth.company_id).await? {
        Some(plan) => get_menu_items_for_plan(plan.tier, Some(&plan.features)),
        None => Vec::new(),
    };

    Ok(Json(items))
}

pub async fn quota_usage<C, R>(
    State(state): State<PlansState<C, R>>,
    auth: AuthUser,
    Path(resource): Path<String>,
) -> Result<Json<UsageSnapshot>, AppError>
where
    C: CompanyRepository + Send + Sync + 'static,
    R: ResourceCounterRepository + Send + Sync + 'static,
{
    let resource = parse_resource(&resource)?;
    let snapshot = state.quota.usage(auth.company_id, resource).await?;
    Ok(Json(snapshot))
}

pub async fn enforce_quota<C, R>(
    State(state): State<PlansState<C, R>>,
    auth: AuthUser,
    Path(resource): Path<String>,
) -> Result<StatusCode, AppError>
where
    C: CompanyRepository + Send + Sync + 'static,
    R: ResourceCounterRepository + Send + Sync + 'static,
{
    let resource = parse_resource(&resource)?;
    state.quota.ensure_can_add(auth.company_id, resource).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn gate<C, R>(
    State(state): State<PlansState<C, R>>,
    auth: AuthUser,
    query: Result<Query<GateQuery>, QueryRejection>,
) -> Result<Json<GateResponse>, AppError>
where
    C: CompanyRepository + Send + Sync + 'static,
    R: ResourceCounterRepository + Send + Sync + 'static,
{
    let Query(query) = query?;
    let plan = state.quota.current_plan(auth.company_id).await?;
    let has_access = has_plan_feature(plan.as_ref(), &query.feature);
    let outcome = decide_gate(has_access, query.mode);
    let feature = Feature::from_name(&query.feature);

    let (upgrade_message, next_plan) = match (&plan, has_access) {
        (Some(plan), false) => {
            let label = query.label.as_deref().unwrap_or(&query.feature);
            let message = match feature {
                Some(feature) => get_feature_upgrade_message(plan.tier, feature, label),
                None => get_upgrade_message(plan.tier, label),
            };
            (Some(message), get_next_plan(plan.tier))
        }
        _ => (None, None),
    };

    Ok(Json(GateResponse {
        feature: query.feature,
        has_access,
        outcome,
        upgrade_message,
        next_plan,
        required_plan: feature.map(lowest_plan_with),
    }))
}

pub async fn request_upgrade<C, R>(
    State(state): State<PlansState<C, R>>,
    auth: AuthUser,
    request: Result<Json<UpgradeRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError>
where
    C: CompanyRepository + Send + Sync + 'static,
    R: ResourceCounterRepository + Send + Sync + 'static,
{
    let Json(request) = request?;
    let path = state
        .plan_changes
        .request_upgrade(auth.company_id, request.target_tier)
        .await?;

    let status = match path {
        UpgradePath::Checkout(_) => StatusCode::OK,
        UpgradePath::QuoteRequested(_) => StatusCode::ACCEPTED,
    };

    Ok((status, Json(path)))
}

pub async fn refresh<C, R>(
    State(state): State<PlansState<C, R>>,
    auth: AuthUser,
) -> StatusCode
where
    C: CompanyRepository + Send + Sync + 'static,
    R: ResourceCounterRepository + Send + Sync + 'static,
{
    state.plan_resolver.invalidate(auth.company_id).await;
    info!(company_id = %auth.company_id, "plans: cached plan refreshed on request");
    StatusCode::NO_CONTENT
}

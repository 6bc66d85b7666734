use std::sync::Arc;

use axum::http::StatusCode;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    application::usecases::{
        gates::usage_snapshot,
        plan_permissions::{PermissionError, can_add_resource},
        plan_resolver::PlanResolver,
    },
    domain::{
        repositories::{companies::CompanyRepository, resource_counters::ResourceCounterRepository},
        value_objects::{
            enums::{features::Feature, resource_types::ResourceType},
            plan_data::PlanData,
            quota::UsageSnapshot,
        },
    },
};

#[derive(Debug, Error)]
pub enum QuotaError {
    #[error("no plan data available for this company")]
    PlanUnavailable,
    #[error("{0}")]
    LimitReached(String),
    #[error("{0}")]
    ResourceUnavailable(String),
    #[error("feature {0} is not included in the current plan")]
    FeatureDisabled(Feature),
    #[error(transparent)]
    InvalidCount(#[from] PermissionError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl QuotaError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            QuotaError::PlanUnavailable
            | QuotaError::LimitReached(_)
            | QuotaError::ResourceUnavailable(_)
            | QuotaError::FeatureDisabled(_) => StatusCode::FORBIDDEN,
            // A negative count comes from storage, not from the caller.
            QuotaError::InvalidCount(_) | QuotaError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

pub type QuotaResult<T> = std::result::Result<T, QuotaError>;

/// Server-side counterpart of the dashboard's limit guards.
///
/// The count is read before the caller mutates anything, so two concurrent
/// creations can both pass; the storage layer owning the insert must enforce
/// the cap atomically when that matters.
pub struct QuotaEnforcementUseCase<C, R>
where
    C: CompanyRepository + Send + Sync + 'static,
    R: ResourceCounterRepository + Send + Sync + 'static,
{
    plan_resolver: Arc<PlanResolver<C>>,
    counter_repo: Arc<R>,
}

impl<C, R> QuotaEnforcementUseCase<C, R>
where
    C: CompanyRepository + Send + Sync + 'static,
    R: ResourceCounterRepository + Send + Sync + 'static,
{
    pub fn new(plan_resolver: Arc<PlanResolver<C>>, counter_repo: Arc<R>) -> Self {
        Self {
            plan_resolver,
            counter_repo,
        }
    }

    pub async fn current_plan(&self, company_id: Uuid) -> QuotaResult<Option<PlanData>> {
        Ok(self.plan_resolver.resolve(company_id).await?)
    }

    pub async fn usage(
        &self,
        company_id: Uuid,
        resource: ResourceType,
    ) -> QuotaResult<UsageSnapshot> {
        let plan = self
            .current_plan(company_id)
            .await?
            .ok_or(QuotaError::PlanUnavailable)?;

        let current = self
            .counter_repo
            .count(company_id, resource)
            .await
            .map_err(|err| {
                error!(
                    %company_id,
                    %resource,
                    db_error = ?err,
                    "quota: failed to count resources"
                );
                QuotaError::Internal(err)
            })?;

        let decision = can_add_resource(plan.tier, resource, current).map_err(|err| {
            error!(%company_id, %resource, error = %err, "quota: storage returned an invalid count");
            err
        })?;

        Ok(usage_snapshot(resource, current, decision))
    }

    pub async fn ensure_can_add(
        &self,
        company_id: Uuid,
        resource: ResourceType,
    ) -> QuotaResult<UsageSnapshot> {
        let snapshot = self.usage(company_id, resource).await?;

        if snapshot.decision.can_add {
            info!(
                %company_id,
                %resource,
                current = snapshot.current_count,
                "quota: creation allowed"
            );
            return Ok(snapshot);
        }

        let reason = snapshot
            .decision
            .reason
            .clone()
            .unwrap_or_else(|| format!("{} limit reached", resource));

        warn!(
            %company_id,
            %resource,
            current = snapshot.current_count,
            limit = ?snapshot.limit,
            "quota: creation denied"
        );

        match snapshot.limit {
            Some(0) => Err(QuotaError::ResourceUnavailable(reason)),
            _ => Err(QuotaError::LimitReached(reason)),
        }
    }

    pub async fn ensure_feature(&self, company_id: Uuid, feature: Feature) -> QuotaResult<()> {
        let plan = self
            .current_plan(company_id)
            .await?
            .ok_or(QuotaError::PlanUnavailable)?;

        if plan.features.get(feature) {
            return Ok(());
        }

        warn!(%company_id, tier = %plan.tier, %feature, "quota: feature denied");
        Err(QuotaError::FeatureDisabled(feature))
    }
}

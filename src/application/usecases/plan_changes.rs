use std::sync::Arc;

use axum::http::StatusCode;
use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    application::usecases::plan_resolver::PlanResolver,
    domain::{
        entities::companies::CompanyPlanChangeset, repositories::companies::CompanyRepository,
        value_objects::enums::plan_tiers::PlanTier,
    },
};

#[derive(Debug, Error)]
pub enum PlanChangeError {
    #[error("company not found")]
    CompanyNotFound,
    #[error("current plan could not be determined")]
    PlanUnavailable,
    #[error("{target} is not above the current {current} plan")]
    NotAnUpgrade { current: PlanTier, target: PlanTier },
    #[error("an upgrade quote is already pending")]
    QuoteAlreadyPending,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl PlanChangeError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PlanChangeError::CompanyNotFound => StatusCode::NOT_FOUND,
            PlanChangeError::NotAnUpgrade { .. } => StatusCode::BAD_REQUEST,
            PlanChangeError::QuoteAlreadyPending => StatusCode::CONFLICT,
            PlanChangeError::PlanUnavailable | PlanChangeError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

pub type PlanChangeResult<T> = std::result::Result<T, PlanChangeError>;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "path", content = "targetTier")]
pub enum UpgradePath {
    /// Instant upgrade handled by the billing checkout.
    Checkout(PlanTier),
    /// Upgrade recorded and waiting for manual approval.
    QuoteRequested(PlanTier),
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransitionDirection {
    Upgrade,
    Downgrade,
    Unchanged,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct PlanTransition {
    pub from: Option<PlanTier>,
    pub to: PlanTier,
    pub direction: TransitionDirection,
}

impl PlanTransition {
    fn new(from: Option<PlanTier>, to: PlanTier) -> Self {
        let direction = match from {
            Some(from) if to > from => TransitionDirection::Upgrade,
            Some(from) if to < from => TransitionDirection::Downgrade,
            Some(_) => TransitionDirection::Unchanged,
            // An unreadable stored tier is replaced; treat it as moving up.
            None => TransitionDirection::Upgrade,
        };

        Self {
            from,
            to,
            direction,
        }
    }
}

pub struct PlanChangeUseCase<C>
where
    C: CompanyRepository + Send + Sync + 'static,
{
    company_repo: Arc<C>,
    plan_resolver: Arc<PlanResolver<C>>,
}

impl<C> PlanChangeUseCase<C>
where
    C: CompanyRepository + Send + Sync + 'static,
{
    pub fn new(company_repo: Arc<C>, plan_resolver: Arc<PlanResolver<C>>) -> Self {
        Self {
            company_repo,
            plan_resolver,
        }
    }

    pub async fn request_upgrade(
        &self,
        company_id: Uuid,
        target: PlanTier,
    ) -> PlanChangeResult<UpgradePath> {
        info!(%company_id, %target, "plan_changes: upgrade requested");

        let row = self
            .company_repo
            .find_plan(company_id)
            .await?
            .ok_or(PlanChangeError::CompanyNotFound)?;

        let current = row.plan_tier.parse::<PlanTier>().map_err(|err| {
            error!(%company_id, error = %err, "plan_changes: stored tier is unreadable");
            PlanChangeError::PlanUnavailable
        })?;

        if target <= current {
            warn!(%company_id, %current, %target, "plan_changes: rejected non-upgrade request");
            return Err(PlanChangeError::NotAnUpgrade { current, target });
        }

        if row.quote_pending {
            warn!(
                %company_id,
                requested_tier = ?row.requested_tier,
                "plan_changes: quote already pending"
            );
            return Err(PlanChangeError::QuoteAlreadyPending);
        }

        if !target.requires_quote() {
            info!(%company_id, %target, "plan_changes: routing to checkout");
            return Ok(UpgradePath::Checkout(target));
        }

        let changeset = CompanyPlanChangeset {
            plan_tier: None,
            requested_tier: Some(Some(target.to_string())),
            quote_pending: true,
            updated_at: Utc::now(),
        };

        self.company_repo
            .update_plan(company_id, changeset)
            .await
            .map_err(|err| {
                error!(%company_id, db_error = ?err, "plan_changes: failed to record quote request");
                err
            })?;
        self.plan_resolver.invalidate(company_id).await;

        info!(%company_id, %target, "plan_changes: quote requested");
        Ok(UpgradePath::QuoteRequested(target))
    }

    /// Applies a tier after checkout success or an admin decision. Any pending
    /// quote is cleared.
    pub async fn apply_plan_change(
        &self,
        company_id: Uuid,
        tier: PlanTier,
    ) -> PlanChangeResult<PlanTransition> {
        let row = self
            .company_repo
            .find_plan(company_id)
            .await?
            .ok_or(PlanChangeError::CompanyNotFound)?;

        let transition = PlanTransition::new(row.plan_tier.parse::<PlanTier>().ok(), tier);

        let changeset = CompanyPlanChangeset {
            plan_tier: Some(tier.to_string()),
            requested_tier: Some(None),
            quote_pending: false,
            updated_at: Utc::now(),
        };

        self.company_repo
            .update_plan(company_id, changeset)
            .await
            .map_err(|err| {
                error!(%company_id, db_error = ?err, "plan_changes: failed to apply plan change");
                err
            })?;
        self.plan_resolver.invalidate(company_id).await;

        info!(
            %company_id,
            from = ?transition.from,
            to = %transition.to,
            direction = ?transition.direction,
            "plan_changes: plan changed"
        );

        Ok(transition)
    }
}

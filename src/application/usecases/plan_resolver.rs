use anyhow::Result;
use moka::future::Cache;
use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::domain::{
    repositories::companies::CompanyRepository,
    value_objects::{enums::plan_tiers::PlanTier, plan_data::PlanData},
};

/// Loads the plan snapshot for a company, cached for a short TTL.
///
/// `Ok(None)` means "no plan data available": the company is unknown or its
/// stored tier is not one of the four wire values. Every gate denies in that
/// case.
///
/// Each company also has a generation counter that `invalidate` bumps. A load
/// that overlaps an invalidation never leaves its (possibly stale) row cached.
pub struct PlanResolver<C>
where
    C: CompanyRepository + Send + Sync + 'static,
{
    company_repo: Arc<C>,
    cache: Cache<Uuid, PlanData>,
    generations: Cache<Uuid, Arc<AtomicU64>>,
}

impl<C> PlanResolver<C>
where
    C: CompanyRepository + Send + Sync + 'static,
{
    pub fn new(company_repo: Arc<C>, ttl: Duration, max_capacity: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(ttl)
            .build();
        let generations = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_idle(ttl)
            .build();

        Self {
            company_repo,
            cache,
            generations,
        }
    }

    async fn generation(&self, company_id: Uuid) -> Arc<AtomicU64> {
        self.generations
            .get_with(company_id, async { Arc::new(AtomicU64::new(0)) })
            .await
    }

    pub async fn resolve(&self, company_id: Uuid) -> Result<Option<PlanData>> {
        if let Some(plan) = self.cache.get(&company_id).await {
            debug!(%company_id, tier = %plan.tier, "plan_resolver: cache hit");
            return Ok(Some(plan));
        }

        let generation = self.generation(company_id).await;
        let observed = generation.load(Ordering::Acquire);

        let row = self
            .company_repo
            .find_plan(company_id)
            .await
            .map_err(|err| {
                error!(
                    %company_id,
                    db_error = ?err,
                    "plan_resolver: failed to load company plan"
                );
                err
            })?;

        let Some(row) = row else {
            warn!(%company_id, "plan_resolver: company not found");
            return Ok(None);
        };

        let tier = match row.plan_tier.parse::<PlanTier>() {
            Ok(tier) => tier,
            Err(err) => {
                warn!(
                    %company_id,
                    error = %err,
                    "plan_resolver: unrecognised stored tier, denying access"
                );
                return Ok(None);
            }
        };

        let plan = PlanData {
            requested_tier: row
                .requested_tier
                .as_deref()
                .and_then(|raw| raw.parse::<PlanTier>().ok()),
            ..PlanData::for_tier(tier, row.quote_pending, row.plan_is_active)
        };

        // Insert first, then re-check: an invalidation racing this load either
        // bumped the generation already (we evict) or evicts after its bump.
        self.cache.insert(company_id, plan.clone()).await;
        let current = self.generation(company_id).await;
        if !Arc::ptr_eq(&generation, &current) || current.load(Ordering::Acquire) != observed {
            self.cache.invalidate(&company_id).await;
            debug!(%company_id, %tier, "plan_resolver: plan changed during load, not cached");
        } else {
            debug!(%company_id, %tier, "plan_resolver: plan loaded");
        }

        Ok(Some(plan))
    }

    pub async fn invalidate(&self, company_id: Uuid) {
        self.generation(company_id)
            .await
            .fetch_add(1, Ordering::AcqRel);
        self.cache.invalidate(&company_id).await;
        debug!(%company_id, "plan_resolver: cache entry invalidated");
    }
}

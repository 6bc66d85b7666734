use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, prelude::*};
use std::sync::Arc;
use tokio::task;
use uuid::Uuid;

use crate::{
    domain::{
        entities::companies::{CompanyPlanChangeset, CompanyPlanEntity},
        repositories::companies::CompanyRepository,
    },
    infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::companies},
};

pub struct CompanyPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl CompanyPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl CompanyRepository for CompanyPostgres {
    async fn find_plan(&self, company_id: Uuid) -> Result<Option<CompanyPlanEntity>> {
        // Diesel is synchronous; keep pool waits and queries off the async workers.
        let db_pool = Arc::clone(&self.db_pool);

        Ok(task::spawn_blocking(move || -> Result<Option<CompanyPlanEntity>> {
            let mut conn = db_pool.get()?;

            let row = companies::table
                .filter(companies::id.eq(company_id))
                .select(CompanyPlanEntity::as_select())
                .first::<CompanyPlanEntity>(&mut conn)
                .optional()?;

            Ok(row)
        })
        .await??)
    }

    async fn update_plan(&self, company_id: Uuid, changeset: CompanyPlanChangeset) -> Result<()> {
        let db_pool = Arc::clone(&self.db_pool);

        Ok(task::spawn_blocking(move || -> Result<()> {
            let mut conn = db_pool.get()?;

            let updated = diesel::update(companies::table.filter(companies::id.eq(company_id)))
                .set(&changeset)
                .execute(&mut conn)?;

            if updated == 0 {
                return Err(anyhow::anyhow!("Company not found: {}", company_id));
            }

            Ok(())
        })
        .await??)
    }
}

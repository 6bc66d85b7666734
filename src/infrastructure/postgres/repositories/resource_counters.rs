use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, prelude::*};
use std::sync::Arc;
use tokio::task;
use uuid::Uuid;

use crate::{
    domain::{
        repositories::resource_counters::ResourceCounterRepository,
        value_objects::enums::resource_types::ResourceType,
    },
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{events, participants, vehicles},
    },
};

pub struct ResourceCounterPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl ResourceCounterPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl ResourceCounterRepository for ResourceCounterPostgres {
    async fn count(&self, company_id: Uuid, resource: ResourceType) -> Result<i64> {
        let db_pool = Arc::clone(&self.db_pool);

        Ok(task::spawn_blocking(move || -> Result<i64> {
            let mut conn = db_pool.get()?;

            let count = match resource {
                ResourceType::Events => events::table
                    .filter(events::company_id.eq(company_id))
                    .count()
                    .get_result::<i64>(&mut conn)?,
                ResourceType::Participants => participants::table
                    .filter(participants::company_id.eq(company_id))
                    .count()
                    .get_result::<i64>(&mut conn)?,
                ResourceType::Vehicles => vehicles::table
                    .filter(vehicles::company_id.eq(company_id))
                    .count()
                    .get_result::<i64>(&mut conn)?,
            };

            Ok(count)
        })
        .await??)
    }
}

use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::value_objects::enums::resource_types::ResourceType;

/// Live resource counts owned by a company.
#[automock]
#[async_trait]
pub trait ResourceCounterRepository {
    async fn count(&self, company_id: Uuid, resource: ResourceType) -> Result<i64>;
}

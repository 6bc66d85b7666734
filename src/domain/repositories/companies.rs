use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::companies::{CompanyPlanChangeset, CompanyPlanEntity};

#[automock]
#[async_trait]
pub trait CompanyRepository {
    async fn find_plan(&self, company_id: Uuid) -> Result<Option<CompanyPlanEntity>>;
    async fn update_plan(&self, company_id: Uuid, changeset: CompanyPlanChangeset) -> Result<()>;
}

use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::businesses::{BusinessEntity, InsertBusinessEntity};

#[async_trait]
#[automock]
pub trait BusinessRepository {
    async fn find_by_id(&self, business_id: Uuid) -> Result<Option<BusinessEntity>>;

    /// Inserts the business or refreshes the provider-mirrored fields when a
    /// row with the same provider location id already exists. The original
    /// owner is kept on conflict.
    async fn upsert_by_google_id(
        &self,
        insert_business_entity: InsertBusinessEntity,
    ) -> Result<BusinessEntity>;
}

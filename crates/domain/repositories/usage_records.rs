use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::usage_records::UsageRecordEntity;

#[async_trait]
#[automock]
pub trait UsageRecordRepository {
    async fn find_monthly(
        &self,
        user_id: Uuid,
        month: i32,
        year: i32,
    ) -> Result<Option<UsageRecordEntity>>;

    /// Atomically increments the monthly counter unless it already sits at or
    /// above `quota`. Returns whether the increment landed. This is the quota
    /// gate, so the check and the write must be a single statement.
    async fn try_increment_monthly(
        &self,
        user_id: Uuid,
        month: i32,
        year: i32,
        quota: i32,
    ) -> Result<bool>;
}

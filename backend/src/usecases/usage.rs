use chrono::{Datelike, Utc};
use crates::domain::{
    repositories::{usage_records::UsageRecordRepository, users::UserRepository},
    value_objects::enums::plans::{FREE_MONTHLY_POST_QUOTA, Plan},
};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::axum_http::error_responses::AppError;

pub fn current_month_year() -> (i32, i32) {
    let now = Utc::now();
    (now.month() as i32, now.year())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageStatsDto {
    pub current_usage: i32,
    /// -1 means unlimited.
    pub limit: i32,
    pub plan: String,
    pub can_create_post: bool,
}

pub struct UsageUseCase<U, G>
where
    U: UserRepository + Send + Sync + 'static,
    G: UsageRecordRepository + Send + Sync + 'static,
{
    user_repo: Arc<U>,
    usage_repo: Arc<G>,
}

impl<U, G> UsageUseCase<U, G>
where
    U: UserRepository + Send + Sync + 'static,
    G: UsageRecordRepository + Send + Sync + 'static,
{
    pub fn new(user_repo: Arc<U>, usage_repo: Arc<G>) -> Self {
        Self {
            user_repo,
            usage_repo,
        }
    }

    pub async fn monthly_usage(&self, user_id: Uuid) -> Result<UsageStatsDto, AppError> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::Unauthorized)?;
        let plan = Plan::from_stored(&user.plan);

        let (month, year) = current_month_year();
        let current_usage = self
            .usage_repo
            .find_monthly(user_id, month, year)
            .await?
            .map(|record| record.post_count)
            .unwrap_or(0);

        let limit = match plan {
            Plan::Free => FREE_MONTHLY_POST_QUOTA,
            Plan::Unlimited => -1,
        };
        let can_create_post = plan == Plan::Unlimited || current_usage < FREE_MONTHLY_POST_QUOTA;

        Ok(UsageStatsDto {
            current_usage,
            limit,
            plan: plan.to_string(),
            can_create_post,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crates::domain::{
        entities::{usage_records::UsageRecordEntity, users::UserEntity},
        repositories::{
            usage_records::MockUsageRecordRepository, users::MockUserRepository,
        },
    };
    use mockall::predicate::eq;

    fn sample_user(user_id: Uuid, plan: &str) -> UserEntity {
        let now = Utc::now();
        UserEntity {
            id: user_id,
            display_name: Some("Owner".to_string()),
            email: "owner@example.com".to_string(),
            plan: plan.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_record(user_id: Uuid, post_count: i32) -> UsageRecordEntity {
        let now = Utc::now();
        let (month, year) = current_month_year();
        UsageRecordEntity {
            id: Uuid::new_v4(),
            user_id,
            month,
            year,
            post_count,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn free_user_under_quota_can_create() {
        let user_id = Uuid::new_v4();

        let mut user_repo = MockUserRepository::new();
        let mut usage_repo = MockUsageRecordRepository::new();

        user_repo
            .expect_find_by_id()
            .with(eq(user_id))
            .returning(move |_| Box::pin(async move { Ok(Some(sample_user(user_id, "FREE"))) }));
        usage_repo.expect_find_monthly().returning(move |_, _, _| {
            Box::pin(async move { Ok(Some(sample_record(user_id, 2))) })
        });

        let usecase = UsageUseCase::new(Arc::new(user_repo), Arc::new(usage_repo));
        let stats = usecase.monthly_usage(user_id).await.unwrap();

        assert_eq!(stats.current_usage, 2);
        assert_eq!(stats.limit, FREE_MONTHLY_POST_QUOTA);
        assert_eq!(stats.plan, "FREE");
        assert!(stats.can_create_post);
    }

    #[tokio::test]
    async fn free_user_at_quota_cannot_create() {
        let user_id = Uuid::new_v4();

        let mut user_repo = MockUserRepository::new();
        let mut usage_repo = MockUsageRecordRepository::new();

        user_repo
            .expect_find_by_id()
            .returning(move |_| Box::pin(async move { Ok(Some(sample_user(user_id, "FREE"))) }));
        usage_repo.expect_find_monthly().returning(move |_, _, _| {
            Box::pin(async move { Ok(Some(sample_record(user_id, FREE_MONTHLY_POST_QUOTA))) })
        });

        let usecase = UsageUseCase::new(Arc::new(user_repo), Arc::new(usage_repo));
        let stats = usecase.monthly_usage(user_id).await.unwrap();

        assert_eq!(stats.current_usage, FREE_MONTHLY_POST_QUOTA);
        assert!(!stats.can_create_post);
    }

    #[tokio::test]
    async fn unlimited_user_is_never_capped() {
        let user_id = Uuid::new_v4();

        let mut user_repo = MockUserRepository::new();
        let mut usage_repo = MockUsageRecordRepository::new();

        user_repo.expect_find_by_id().returning(move |_| {
            Box::pin(async move { Ok(Some(sample_user(user_id, "UNLIMITED"))) })
        });
        usage_repo.expect_find_monthly().returning(move |_, _, _| {
            Box::pin(async move { Ok(Some(sample_record(user_id, 42))) })
        });

        let usecase = UsageUseCase::new(Arc::new(user_repo), Arc::new(usage_repo));
        let stats = usecase.monthly_usage(user_id).await.unwrap();

        assert_eq!(stats.limit, -1);
        assert_eq!(stats.plan, "UNLIMITED");
        assert!(stats.can_create_post);
    }

    #[tokio::test]
    async fn missing_record_counts_as_zero() {
        let user_id = Uuid::new_v4();

        let mut user_repo = MockUserRepository::new();
        let mut usage_repo = MockUsageRecordRepository::new();

        user_repo
            .expect_find_by_id()
            .returning(move |_| Box::pin(async move { Ok(Some(sample_user(user_id, "FREE"))) }));
        usage_repo
            .expect_find_monthly()
            .returning(|_, _, _| Box::pin(async { Ok(None) }));

        let usecase = UsageUseCase::new(Arc::new(user_repo), Arc::new(usage_repo));
        let stats = usecase.monthly_usage(user_id).await.unwrap();

        assert_eq!(stats.current_usage, 0);
        assert!(stats.can_create_post);
    }
}

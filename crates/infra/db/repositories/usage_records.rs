use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use diesel::{insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::usage_records::{InsertUsageRecordEntity, UsageRecordEntity},
        repositories::usage_records::UsageRecordRepository,
    },
    infra::db::postgres::{postgres_connection::PgPoolSquad, schema::usage_records},
};

pub struct UsageRecordPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl UsageRecordPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl UsageRecordRepository for UsageRecordPostgres {
    async fn find_monthly(
        &self,
        user_id: Uuid,
        month: i32,
        year: i32,
    ) -> Result<Option<UsageRecordEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = usage_records::table
            .filter(usage_records::user_id.eq(user_id))
            .filter(usage_records::month.eq(month))
            .filter(usage_records::year.eq(year))
            .select(UsageRecordEntity::as_select())
            .first::<UsageRecordEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn try_increment_monthly(
        &self,
        user_id: Uuid,
        month: i32,
        year: i32,
        quota: i32,
    ) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;
        let now = Utc::now();

        // Guarded increment: the WHERE clause keeps the counter below the
        // ceiling even under concurrent requests for the same month.
        let updated = update(usage_records::table)
            .filter(usage_records::user_id.eq(user_id))
            .filter(usage_records::month.eq(month))
            .filter(usage_records::year.eq(year))
            .filter(usage_records::post_count.lt(quota))
            .set((
                usage_records::post_count.eq(usage_records::post_count + 1),
                usage_records::updated_at.eq(now),
            ))
            .execute(&mut conn)?;
        if updated > 0 {
            return Ok(true);
        }

        // No counter row yet for this month.
        let inserted = insert_into(usage_records::table)
            .values(&InsertUsageRecordEntity {
                user_id,
                month,
                year,
                post_count: 1,
                created_at: now,
                updated_at: now,
            })
            .on_conflict((
                usage_records::user_id,
                usage_records::month,
                usage_records::year,
            ))
            .do_nothing()
            .execute(&mut conn)?;
        if inserted > 0 {
            return Ok(true);
        }

        // A concurrent request created the row between the two statements;
        // retry the guarded increment once before reporting the quota as hit.
        let retried = update(usage_records::table)
            .filter(usage_records::user_id.eq(user_id))
            .filter(usage_records::month.eq(month))
            .filter(usage_records::year.eq(year))
            .filter(usage_records::post_count.lt(quota))
            .set((
                usage_records::post_count.eq(usage_records::post_count + 1),
                usage_records::updated_at.eq(now),
            ))
            .execute(&mut conn)?;

        Ok(retried > 0)
    }
}

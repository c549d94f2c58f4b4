use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use diesel::{delete, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::posts::{EditPostEntity, InsertPostEntity, PostEntity},
        repositories::posts::PostRepository,
        value_objects::enums::{post_statuses::PostStatus, post_types::PostType},
    },
    infra::db::postgres::{postgres_connection::PgPoolSquad, schema::posts},
};

pub struct PostPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl PostPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl PostRepository for PostPostgres {
    async fn list_by_user(
        &self,
        user_id: Uuid,
        status: Option<PostStatus>,
        post_type: Option<PostType>,
    ) -> Result<Vec<PostEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let mut query = posts::table
            .filter(posts::user_id.eq(user_id))
            .into_boxed();

        if let Some(status) = status {
            query = query.filter(posts::status.eq(status.to_string()));
        }
        if let Some(post_type) = post_type {
            query = query.filter(posts::type_.eq(post_type.to_string()));
        }

        let results = query
            .order(posts::created_at.desc())
            .select(PostEntity::as_select())
            .load::<PostEntity>(&mut conn)?;

        Ok(results)
    }

    async fn create(&self, insert_post_entity: InsertPostEntity) -> Result<PostEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(posts::table)
            .values(&insert_post_entity)
            .returning(PostEntity::as_returning())
            .get_result::<PostEntity>(&mut conn)?;

        Ok(result)
    }

    async fn find_by_id(&self, post_id: Uuid) -> Result<Option<PostEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = posts::table
            .find(post_id)
            .select(PostEntity::as_select())
            .first::<PostEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn find_by_id_and_user(
        &self,
        post_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<PostEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = posts::table
            .filter(posts::id.eq(post_id))
            .filter(posts::user_id.eq(user_id))
            .select(PostEntity::as_select())
            .first::<PostEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn update(&self, post_id: Uuid, edit_post_entity: EditPostEntity) -> Result<PostEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = update(posts::table)
            .filter(posts::id.eq(post_id))
            .set(&edit_post_entity)
            .returning(PostEntity::as_returning())
            .get_result::<PostEntity>(&mut conn)?;

        Ok(result)
    }

    async fn delete(&self, post_id: Uuid) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        delete(posts::table)
            .filter(posts::id.eq(post_id))
            .execute(&mut conn)?;

        Ok(())
    }

    async fn mark_published(&self, post_id: Uuid, google_post_id: &str) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(posts::table)
            .filter(posts::id.eq(post_id))
            .set((
                posts::status.eq(PostStatus::Published.to_string()),
                posts::google_post_id.eq(Some(google_post_id.to_string())),
                posts::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)?;

        Ok(())
    }
}

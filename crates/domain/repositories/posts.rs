use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::posts::{EditPostEntity, InsertPostEntity, PostEntity};
use crate::domain::value_objects::enums::{post_statuses::PostStatus, post_types::PostType};

#[async_trait]
#[automock]
pub trait PostRepository {
    async fn list_by_user(
        &self,
        user_id: Uuid,
        status: Option<PostStatus>,
        post_type: Option<PostType>,
    ) -> Result<Vec<PostEntity>>;

    async fn create(&self, insert_post_entity: InsertPostEntity) -> Result<PostEntity>;

    async fn find_by_id(&self, post_id: Uuid) -> Result<Option<PostEntity>>;

    async fn find_by_id_and_user(&self, post_id: Uuid, user_id: Uuid)
    -> Result<Option<PostEntity>>;

    async fn update(&self, post_id: Uuid, edit_post_entity: EditPostEntity) -> Result<PostEntity>;

    async fn delete(&self, post_id: Uuid) -> Result<()>;

    async fn mark_published(&self, post_id: Uuid, google_post_id: &str) -> Result<()>;
}

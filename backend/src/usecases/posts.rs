use chrono::{DateTime, Utc};
use crates::domain::{
    entities::posts::{EditPostEntity, InsertPostEntity, PostEntity},
    repositories::{
        businesses::BusinessRepository, posts::PostRepository,
        usage_records::UsageRecordRepository, users::UserRepository,
    },
    value_objects::enums::{
        plans::{FREE_MONTHLY_POST_QUOTA, Plan},
        post_statuses::PostStatus,
        post_types::PostType,
    },
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::axum_http::error_responses::AppError;
use crate::usecases::usage::current_month_year;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub business_id: Option<Uuid>,
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub status: String,
    pub image_url: Option<String>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub event_start_date: Option<DateTime<Utc>>,
    pub event_end_date: Option<DateTime<Utc>>,
    pub event_location: Option<String>,
    pub offer_valid_until: Option<DateTime<Utc>>,
    pub offer_terms: Option<String>,
    pub google_post_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PostEntity> for PostDto {
    fn from(entity: PostEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            business_id: entity.business_id,
            title: entity.title,
            content: entity.content,
            type_: entity.type_,
            status: entity.status,
            image_url: entity.image_url,
            scheduled_at: entity.scheduled_at,
            event_start_date: entity.event_start_date,
            event_end_date: entity.event_end_date,
            event_location: entity.event_location,
            offer_valid_until: entity.offer_valid_until,
            offer_terms: entity.offer_terms,
            google_post_id: entity.google_post_id,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Body for both create and full-replace update. Every field is optional at
/// the wire level so a malformed body surfaces as 400 instead of a
/// deserialization-shaped rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPayload {
    pub title: Option<String>,
    pub content: Option<String>,
    #[serde(rename = "type")]
    pub type_: Option<String>,
    pub business_id: Option<Uuid>,
    pub image_url: Option<String>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub event_start_date: Option<DateTime<Utc>>,
    pub event_end_date: Option<DateTime<Utc>>,
    pub event_location: Option<String>,
    pub offer_valid_until: Option<DateTime<Utc>>,
    pub offer_terms: Option<String>,
}

struct ValidatedPostFields {
    title: String,
    content: String,
    post_type: PostType,
    status: PostStatus,
}

fn validate_payload(payload: &PostPayload) -> Result<ValidatedPostFields, AppError> {
    let title = payload
        .title
        .as_deref()
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .ok_or_else(|| AppError::BadRequest("Title is required".to_string()))?;
    let content = payload
        .content
        .as_deref()
        .map(str::trim)
        .filter(|content| !content.is_empty())
        .ok_or_else(|| AppError::BadRequest("Content is required".to_string()))?;
    let raw_type = payload
        .type_
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("Type is required".to_string()))?;
    let post_type = PostType::parse(raw_type).ok_or_else(|| {
        AppError::BadRequest(format!("Invalid post type: {raw_type}"))
    })?;

    // Status is derived, never accepted from the client.
    let status = if payload.scheduled_at.is_some() {
        PostStatus::Scheduled
    } else {
        PostStatus::Draft
    };

    Ok(ValidatedPostFields {
        title: title.to_string(),
        content: content.to_string(),
        post_type,
        status,
    })
}

fn parse_status_filter(raw: Option<&str>) -> Result<Option<PostStatus>, AppError> {
    match raw {
        None => Ok(None),
        Some(value) if value.eq_ignore_ascii_case("all") => Ok(None),
        Some(value) => PostStatus::parse(value)
            .map(Some)
            .ok_or_else(|| AppError::BadRequest(format!("Invalid status filter: {value}"))),
    }
}

fn parse_type_filter(raw: Option<&str>) -> Result<Option<PostType>, AppError> {
    match raw {
        None => Ok(None),
        Some(value) if value.eq_ignore_ascii_case("all") => Ok(None),
        Some(value) => PostType::parse(value)
            .map(Some)
            .ok_or_else(|| AppError::BadRequest(format!("Invalid type filter: {value}"))),
    }
}

pub struct PostsUseCase<P, B, U, G>
where
    P: PostRepository + Send + Sync + 'static,
    B: BusinessRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    G: UsageRecordRepository + Send + Sync + 'static,
{
    post_repo: Arc<P>,
    business_repo: Arc<B>,
    user_repo: Arc<U>,
    usage_repo: Arc<G>,
}

impl<P, B, U, G> PostsUseCase<P, B, U, G>
where
    P: PostRepository + Send + Sync + 'static,
    B: BusinessRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    G: UsageRecordRepository + Send + Sync + 'static,
{
    pub fn new(
        post_repo: Arc<P>,
        business_repo: Arc<B>,
        user_repo: Arc<U>,
        usage_repo: Arc<G>,
    ) -> Self {
        Self {
            post_repo,
            business_repo,
            user_repo,
            usage_repo,
        }
    }

    pub async fn list(
        &self,
        user_id: Uuid,
        status: Option<&str>,
        post_type: Option<&str>,
    ) -> Result<Vec<PostDto>, AppError> {
        let status = parse_status_filter(status)?;
        let post_type = parse_type_filter(post_type)?;

        let posts = self
            .post_repo
            .list_by_user(user_id, status, post_type)
            .await?;

        Ok(posts.into_iter().map(PostDto::from).collect())
    }

    pub async fn create(&self, user_id: Uuid, payload: PostPayload) -> Result<PostDto, AppError> {
        let fields = validate_payload(&payload)?;

        if let Some(business_id) = payload.business_id {
            let owned = self
                .business_repo
                .find_by_id(business_id)
                .await?
                .is_some_and(|business| business.user_id == user_id);
            if !owned {
                return Err(AppError::Forbidden(
                    "Business not found or unauthorized".to_string(),
                ));
            }
        }

        // The quota slot is reserved before the insert, so two concurrent
        // requests can never both land as the fifth scheduled post.
        let plan = self.plan_for_user(user_id).await?;
        if plan == Plan::Free && fields.status == PostStatus::Scheduled {
            let (month, year) = current_month_year();
            let granted = self
                .usage_repo
                .try_increment_monthly(user_id, month, year, FREE_MONTHLY_POST_QUOTA)
                .await?;
            if !granted {
                debug!(%user_id, "posts: monthly quota exhausted");
                return Err(AppError::Forbidden(
                    "Monthly post limit reached. Upgrade to unlimited plan.".to_string(),
                ));
            }
        }

        let now = Utc::now();
        let post = self
            .post_repo
            .create(InsertPostEntity {
                user_id,
                business_id: payload.business_id,
                title: fields.title,
                content: fields.content,
                type_: fields.post_type.to_string(),
                status: fields.status.to_string(),
                image_url: payload.image_url,
                scheduled_at: payload.scheduled_at,
                event_start_date: payload.event_start_date,
                event_end_date: payload.event_end_date,
                event_location: payload.event_location,
                offer_valid_until: payload.offer_valid_until,
                offer_terms: payload.offer_terms,
                created_at: now,
                updated_at: now,
            })
            .await?;

        Ok(post.into())
    }

    pub async fn get(&self, user_id: Uuid, post_id: Uuid) -> Result<PostDto, AppError> {
        let post = self
            .post_repo
            .find_by_id_and_user(post_id, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

        Ok(post.into())
    }

    pub async fn update(
        &self,
        user_id: Uuid,
        post_id: Uuid,
        payload: PostPayload,
    ) -> Result<PostDto, AppError> {
        let fields = validate_payload(&payload)?;

        if self
            .post_repo
            .find_by_id_and_user(post_id, user_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("Post not found".to_string()));
        }

        let post = self
            .post_repo
            .update(
                post_id,
                EditPostEntity {
                    title: fields.title,
                    content: fields.content,
                    type_: fields.post_type.to_string(),
                    status: fields.status.to_string(),
                    image_url: payload.image_url,
                    scheduled_at: payload.scheduled_at,
                    event_start_date: payload.event_start_date,
                    event_end_date: payload.event_end_date,
                    event_location: payload.event_location,
                    offer_valid_until: payload.offer_valid_until,
                    offer_terms: payload.offer_terms,
                    updated_at: Utc::now(),
                },
            )
            .await?;

        Ok(post.into())
    }

    pub async fn delete(&self, user_id: Uuid, post_id: Uuid) -> Result<(), AppError> {
        if self
            .post_repo
            .find_by_id_and_user(post_id, user_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("Post not found".to_string()));
        }

        self.post_repo.delete(post_id).await?;

        Ok(())
    }

    async fn plan_for_user(&self, user_id: Uuid) -> Result<Plan, AppError> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::Unauthorized)?;

        Ok(Plan::from_stored(&user.plan))
    }
}

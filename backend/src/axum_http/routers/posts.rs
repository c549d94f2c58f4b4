use crate::{
    auth::AuthUser,
    usecases::posts::{PostPayload, PostsUseCase},
};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::get,
};
use crates::{
    domain::repositories::{
        businesses::BusinessRepository, posts::PostRepository,
        usage_records::UsageRecordRepository, users::UserRepository,
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::{
            businesses::BusinessPostgres, posts::PostPostgres,
            usage_records::UsageRecordPostgres, users::UserPostgres,
        },
    },
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct PostsQuery {
    status: Option<String>,
    #[serde(rename = "type")]
    type_: Option<String>,
}

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let post_repository = PostPostgres::new(Arc::clone(&db_pool));
    let business_repository = BusinessPostgres::new(Arc::clone(&db_pool));
    let user_repository = UserPostgres::new(Arc::clone(&db_pool));
    let usage_repository = UsageRecordPostgres::new(Arc::clone(&db_pool));

    let usecase = PostsUseCase::new(
        Arc::new(post_repository),
        Arc::new(business_repository),
        Arc::new(user_repository),
        Arc::new(usage_repository),
    );

    Router::new()
        .route("/", get(list_posts).post(create_post))
        .route(
            "/:post_id",
            get(get_post).put(update_post).delete(delete_post),
        )
        .with_state(Arc::new(usecase))
}

pub async fn list_posts<P, B, U, G>(
    State(usecase): State<Arc<PostsUseCase<P, B, U, G>>>,
    AuthUser { user_id, .. }: AuthUser,
    Query(query): Query<PostsQuery>,
) -> impl IntoResponse
where
    P: PostRepository + Send + Sync + 'static,
    B: BusinessRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    G: UsageRecordRepository + Send + Sync + 'static,
{
    match usecase
        .list(user_id, query.status.as_deref(), query.type_.as_deref())
        .await
    {
        Ok(posts) => Json(json!({ "posts": posts })).into_response(),
        Err(err) => {
            error!(%user_id, error = ?err, "posts: failed to list posts");
            err.into_response()
        }
    }
}

pub async fn create_post<P, B, U, G>(
    State(usecase): State<Arc<PostsUseCase<P, B, U, G>>>,
    AuthUser { user_id, .. }: AuthUser,
    Json(payload): Json<PostPayload>,
) -> impl IntoResponse
where
    P: PostRepository + Send + Sync + 'static,
    B: BusinessRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    G: UsageRecordRepository + Send + Sync + 'static,
{
    info!(%user_id, "posts: create request received");
    match usecase.create(user_id, payload).await {
        Ok(post) => Json(json!({ "post": post })).into_response(),
        Err(err) => {
            error!(%user_id, error = ?err, "posts: failed to create post");
            err.into_response()
        }
    }
}

pub async fn get_post<P, B, U, G>(
    State(usecase): State<Arc<PostsUseCase<P, B, U, G>>>,
    AuthUser { user_id, .. }: AuthUser,
    Path(post_id): Path<Uuid>,
) -> impl IntoResponse
where
    P: PostRepository + Send + Sync + 'static,
    B: BusinessRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    G: UsageRecordRepository + Send + Sync + 'static,
{
    match usecase.get(user_id, post_id).await {
        Ok(post) => Json(json!({ "post": post })).into_response(),
        Err(err) => {
            error!(%user_id, %post_id, error = ?err, "posts: failed to load post");
            err.into_response()
        }
    }
}

pub async fn update_post<P, B, U, G>(
    State(usecase): State<Arc<PostsUseCase<P, B, U, G>>>,
    AuthUser { user_id, .. }: AuthUser,
    Path(post_id): Path<Uuid>,
    Json(payload): Json<PostPayload>,
) -> impl IntoResponse
where
    P: PostRepository + Send + Sync + 'static,
    B: BusinessRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    G: UsageRecordRepository + Send + Sync + 'static,
{
    info!(%user_id, %post_id, "posts: update request received");
    match usecase.update(user_id, post_id, payload).await {
        Ok(post) => Json(json!({ "post": post })).into_response(),
        Err(err) => {
            error!(%user_id, %post_id, error = ?err, "posts: failed to update post");
            err.into_response()
        }
    }
}

pub async fn delete_post<P, B, U, G>(
    State(usecase): State<Arc<PostsUseCase<P, B, U, G>>>,
    AuthUser { user_id, .. }: AuthUser,
    Path(post_id): Path<Uuid>,
) -> impl IntoResponse
where
    P: PostRepository + Send + Sync + 'static,
    B: BusinessRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    G: UsageRecordRepository + Send + Sync + 'static,
{
    info!(%user_id, %post_id, "posts: delete request received");
    match usecase.delete(user_id, post_id).await {
        Ok(()) => Json(json!({ "message": "Post deleted successfully" })).into_response(),
        Err(err) => {
            error!(%user_id, %post_id, error = ?err, "posts: failed to delete post");
            err.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::to_bytes, http::StatusCode};
    use chrono::Utc;
    use crates::domain::{
        entities::posts::{InsertPostEntity, PostEntity},
        repositories::{
            businesses::MockBusinessRepository, posts::MockPostRepository,
            usage_records::MockUsageRecordRepository, users::MockUserRepository,
        },
    };

    fn usecase_with_post_repo(
        post_repo: MockPostRepository,
        user_repo: MockUserRepository,
    ) -> Arc<
        PostsUseCase<
            MockPostRepository,
            MockBusinessRepository,
            MockUserRepository,
            MockUsageRecordRepository,
        >,
    > {
        Arc::new(PostsUseCase::new(
            Arc::new(post_repo),
            Arc::new(MockBusinessRepository::new()),
            Arc::new(user_repo),
            Arc::new(MockUsageRecordRepository::new()),
        ))
    }

    fn entity_from_insert(insert: InsertPostEntity) -> PostEntity {
        PostEntity {
            id: Uuid::new_v4(),
            user_id: insert.user_id,
            business_id: insert.business_id,
            title: insert.title,
            content: insert.content,
            type_: insert.type_,
            status: insert.status,
            image_url: insert.image_url,
            scheduled_at: insert.scheduled_at,
            event_start_date: insert.event_start_date,
            event_end_date: insert.event_end_date,
            event_location: insert.event_location,
            offer_valid_until: insert.offer_valid_until,
            offer_terms: insert.offer_terms,
            google_post_id: None,
            created_at: insert.created_at,
            updated_at: insert.updated_at,
        }
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn list_response_wraps_posts_in_an_envelope() {
        let mut post_repo = MockPostRepository::new();
        post_repo
            .expect_list_by_user()
            .returning(|_, _, _| Box::pin(async { Ok(vec![]) }));
        let usecase = usecase_with_post_repo(post_repo, MockUserRepository::new());

        let auth = crate::auth::AuthUser {
            user_id: Uuid::new_v4(),
            email: None,
        };
        let query = Query(PostsQuery {
            status: None,
            type_: None,
        });
        let response = list_posts(State(usecase), auth, query)
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let value = body_json(response).await;
        assert!(value["posts"].is_array());
    }

    #[tokio::test]
    async fn create_response_wraps_the_post_with_status_ok() {
        let user_id = Uuid::new_v4();

        let mut post_repo = MockPostRepository::new();
        let mut user_repo = MockUserRepository::new();

        user_repo.expect_find_by_id().returning(move |_| {
            let now = Utc::now();
            let user = crates::domain::entities::users::UserEntity {
                id: user_id,
                display_name: None,
                email: "owner@example.com".to_string(),
                plan: "FREE".to_string(),
                created_at: now,
                updated_at: now,
            };
            Box::pin(async move { Ok(Some(user)) })
        });
        post_repo
            .expect_create()
            .returning(|insert| Box::pin(async move { Ok(entity_from_insert(insert)) }));
        let usecase = usecase_with_post_repo(post_repo, user_repo);

        let auth = crate::auth::AuthUser {
            user_id,
            email: None,
        };
        let payload = PostPayload {
            title: Some("Grand opening".to_string()),
            content: Some("Come visit us".to_string()),
            type_: Some("UPDATE".to_string()),
            ..Default::default()
        };
        let response = create_post(State(usecase), auth, Json(payload))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let value = body_json(response).await;
        assert_eq!(value["post"]["title"], "Grand opening");
        assert_eq!(value["post"]["status"], "DRAFT");
    }

    #[tokio::test]
    async fn get_response_wraps_the_post() {
        let user_id = Uuid::new_v4();
        let post_id = Uuid::new_v4();

        let mut post_repo = MockPostRepository::new();
        post_repo
            .expect_find_by_id_and_user()
            .returning(|id, uid| {
                let now = Utc::now();
                let post = PostEntity {
                    id,
                    user_id: uid,
                    business_id: None,
                    title: "Grand opening".to_string(),
                    content: "Come visit us".to_string(),
                    type_: "UPDATE".to_string(),
                    status: "DRAFT".to_string(),
                    image_url: None,
                    scheduled_at: None,
                    event_start_date: None,
                    event_end_date: None,
                    event_location: None,
                    offer_valid_until: None,
                    offer_terms: None,
                    google_post_id: None,
                    created_at: now,
                    updated_at: now,
                };
                Box::pin(async move { Ok(Some(post)) })
            });
        let usecase = usecase_with_post_repo(post_repo, MockUserRepository::new());

        let auth = crate::auth::AuthUser {
            user_id,
            email: None,
        };
        let response = get_post(State(usecase), auth, Path(post_id))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let value = body_json(response).await;
        assert_eq!(value["post"]["id"], post_id.to_string());
    }
}

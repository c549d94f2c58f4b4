use crates::{
    domain::repositories::{
        businesses::BusinessRepository, oauth_credentials::OauthCredentialRepository,
        posts::PostRepository,
    },
    google::{
        business_profile::BusinessProfileApi, local_posts::convert_to_local_post,
        oauth::TokenExchange,
    },
};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::axum_http::error_responses::AppError;
use crate::usecases::google_tokens::GoogleTokenService;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedPostDto {
    pub message: String,
    pub google_post_id: String,
}

pub struct GooglePublishUseCase<P, B, C, X, A>
where
    P: PostRepository + Send + Sync + 'static,
    B: BusinessRepository + Send + Sync + 'static,
    C: OauthCredentialRepository + Send + Sync + 'static,
    X: TokenExchange + Send + Sync + 'static,
    A: BusinessProfileApi + Send + Sync + 'static,
{
    post_repo: Arc<P>,
    business_repo: Arc<B>,
    token_service: Arc<GoogleTokenService<C, X>>,
    profile_api: Arc<A>,
}

impl<P, B, C, X, A> GooglePublishUseCase<P, B, C, X, A>
where
    P: PostRepository + Send + Sync + 'static,
    B: BusinessRepository + Send + Sync + 'static,
    C: OauthCredentialRepository + Send + Sync + 'static,
    X: TokenExchange + Send + Sync + 'static,
    A: BusinessProfileApi + Send + Sync + 'static,
{
    pub fn new(
        post_repo: Arc<P>,
        business_repo: Arc<B>,
        token_service: Arc<GoogleTokenService<C, X>>,
        profile_api: Arc<A>,
    ) -> Self {
        Self {
            post_repo,
            business_repo,
            token_service,
            profile_api,
        }
    }

    pub async fn publish(
        &self,
        user_id: Uuid,
        post_id: Uuid,
    ) -> Result<PublishedPostDto, AppError> {
        let post = self
            .post_repo
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;
        if post.user_id != user_id {
            return Err(AppError::Forbidden("Unauthorized".to_string()));
        }

        let business_id = post.business_id.ok_or_else(|| {
            AppError::BadRequest("Post is not linked to a business".to_string())
        })?;
        let business = self
            .business_repo
            .find_by_id(business_id)
            .await?
            .filter(|business| business.user_id == user_id)
            .ok_or_else(|| {
                AppError::Forbidden("Business not found or unauthorized".to_string())
            })?;

        let access_token = self
            .token_service
            .access_token_for_user(user_id)
            .await?
            .ok_or(AppError::Unauthorized)?;

        let local_post = convert_to_local_post(&post);
        let google_post_id = self
            .profile_api
            .create_local_post(&access_token, &business.google_id, &local_post)
            .await?;

        self.post_repo
            .mark_published(post.id, &google_post_id)
            .await?;

        info!(%post_id, %google_post_id, "google publish: post published");

        Ok(PublishedPostDto {
            message: "Post published successfully".to_string(),
            google_post_id,
        })
    }
}

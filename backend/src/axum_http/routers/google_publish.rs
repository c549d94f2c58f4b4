use crate::{
    auth::AuthUser,
    axum_http::error_responses::AppError,
    config::config_model::DotEnvyConfig,
    usecases::{google_publish::GooglePublishUseCase, google_tokens::GoogleTokenService},
};
use axum::{Json, Router, extract::State, response::IntoResponse, routing::post};
use crates::{
    domain::repositories::{
        businesses::BusinessRepository, oauth_credentials::OauthCredentialRepository,
        posts::PostRepository,
    },
    google::{
        business_profile::{BusinessProfileApi, BusinessProfileClient},
        oauth::{GoogleOauthClient, TokenExchange},
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::{
            businesses::BusinessPostgres, oauth_credentials::OauthCredentialPostgres,
            posts::PostPostgres,
        },
    },
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishPostRequest {
    pub post_id: Option<Uuid>,
}

pub fn routes(db_pool: Arc<PgPoolSquad>, config: Arc<DotEnvyConfig>) -> Router {
    let post_repository = PostPostgres::new(Arc::clone(&db_pool));
    let business_repository = BusinessPostgres::new(Arc::clone(&db_pool));
    let credential_repository = OauthCredentialPostgres::new(Arc::clone(&db_pool));
    let oauth_client = GoogleOauthClient::new(
        config.google.client_id.clone(),
        config.google.client_secret.clone(),
    );
    let token_service = GoogleTokenService::new(
        Arc::new(credential_repository),
        Arc::new(oauth_client),
    );

    let usecase = GooglePublishUseCase::new(
        Arc::new(post_repository),
        Arc::new(business_repository),
        Arc::new(token_service),
        Arc::new(BusinessProfileClient::new()),
    );

    Router::new()
        .route("/google", post(publish_post))
        .with_state(Arc::new(usecase))
}

pub async fn publish_post<P, B, C, X, A>(
    State(usecase): State<Arc<GooglePublishUseCase<P, B, C, X, A>>>,
    AuthUser { user_id, .. }: AuthUser,
    Json(payload): Json<PublishPostRequest>,
) -> impl IntoResponse
where
    P: PostRepository + Send + Sync + 'static,
    B: BusinessRepository + Send + Sync + 'static,
    C: OauthCredentialRepository + Send + Sync + 'static,
    X: TokenExchange + Send + Sync + 'static,
    A: BusinessProfileApi + Send + Sync + 'static,
{
    let Some(post_id) = payload.post_id else {
        return AppError::BadRequest("Post ID is required".to_string()).into_response();
    };

    info!(%user_id, %post_id, "google publish: publish request received");
    match usecase.publish(user_id, post_id).await {
        Ok(published) => Json(published).into_response(),
        Err(err) => {
            error!(%user_id, %post_id, error = ?err, "google publish: failed to publish post");
            err.into_response()
        }
    }
}

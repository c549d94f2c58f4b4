use crate::{
    auth::AuthUser, config::config_model::DotEnvyConfig,
    usecases::businesses::BusinessesUseCase, usecases::google_tokens::GoogleTokenService,
};
use axum::{Json, Router, extract::State, response::IntoResponse, routing::get};
use crates::{
    domain::repositories::{
        businesses::BusinessRepository, oauth_credentials::OauthCredentialRepository,
    },
    google::{
        business_profile::{BusinessProfileApi, BusinessProfileClient},
        oauth::{GoogleOauthClient, TokenExchange},
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::{
            businesses::BusinessPostgres, oauth_credentials::OauthCredentialPostgres,
        },
    },
};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};

pub fn routes(db_pool: Arc<PgPoolSquad>, config: Arc<DotEnvyConfig>) -> Router {
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

    let usecase = BusinessesUseCase::new(
        Arc::new(business_repository),
        Arc::new(token_service),
        Arc::new(BusinessProfileClient::new()),
    );

    Router::new()
        .route("/", get(sync_businesses))
        .with_state(Arc::new(usecase))
}

pub async fn sync_businesses<B, C, X, A>(
    State(usecase): State<Arc<BusinessesUseCase<B, C, X, A>>>,
    AuthUser { user_id, .. }: AuthUser,
) -> impl IntoResponse
where
    B: BusinessRepository + Send + Sync + 'static,
    C: OauthCredentialRepository + Send + Sync + 'static,
    X: TokenExchange + Send + Sync + 'static,
    A: BusinessProfileApi + Send + Sync + 'static,
{
    info!(%user_id, "businesses: sync request received");
    match usecase.sync_from_google(user_id).await {
        Ok(businesses) => Json(json!({ "businesses": businesses })).into_response(),
        Err(err) => {
            error!(%user_id, error = ?err, "businesses: failed to sync businesses");
            err.into_response()
        }
    }
}

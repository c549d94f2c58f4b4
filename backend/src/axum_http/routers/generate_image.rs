use crate::{
    auth::AuthUser, config::config_model::DotEnvyConfig, usecases::image_gen::ImageGenUseCase,
};
use axum::{Json, Router, extract::State, response::IntoResponse, routing::post};
use crates::imagegen::{ImageGenerator, PromptProxyClient};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Debug, Deserialize)]
pub struct GenerateImageRequest {
    pub prompt: Option<String>,
}

pub fn routes(config: Arc<DotEnvyConfig>) -> Router {
    let generator = PromptProxyClient::new(
        config.image_prompt.endpoint.clone(),
        config.image_prompt.api_key.clone(),
    );
    let usecase = ImageGenUseCase::new(Arc::new(generator));

    Router::new()
        .route("/", post(generate_image))
        .with_state(Arc::new(usecase))
}

pub async fn generate_image<I>(
    State(usecase): State<Arc<ImageGenUseCase<I>>>,
    AuthUser { user_id, .. }: AuthUser,
    Json(payload): Json<GenerateImageRequest>,
) -> impl IntoResponse
where
    I: ImageGenerator + Send + Sync + 'static,
{
    info!(%user_id, "image gen: generate request received");
    match usecase
        .generate(payload.prompt.as_deref().unwrap_or_default())
        .await
    {
        Ok(generated) => Json(generated).into_response(),
        Err(err) => {
            error!(%user_id, error = ?err, "image gen: failed to generate image");
            err.into_response()
        }
    }
}

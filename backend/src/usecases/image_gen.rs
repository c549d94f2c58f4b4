use crates::imagegen::ImageGenerator;
use serde::Serialize;
use std::sync::Arc;

use crate::axum_http::error_responses::AppError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedImageDto {
    pub image_url: String,
    pub message: String,
}

pub struct ImageGenUseCase<I>
where
    I: ImageGenerator + Send + Sync + 'static,
{
    image_generator: Arc<I>,
}

impl<I> ImageGenUseCase<I>
where
    I: ImageGenerator + Send + Sync + 'static,
{
    pub fn new(image_generator: Arc<I>) -> Self {
        Self { image_generator }
    }

    pub async fn generate(&self, prompt: &str) -> Result<GeneratedImageDto, AppError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(AppError::BadRequest("Prompt is required".to_string()));
        }

        let image_url = self.image_generator.generate(prompt).await?;

        Ok(GeneratedImageDto {
            image_url,
            message: "Image generated successfully".to_string(),
        })
    }
}

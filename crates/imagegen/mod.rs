use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde_json::json;
use tracing::error;

/// Image returned until the generation pipeline produces real assets.
pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://datasciencedojo.com/wp-content/uploads/prompting-example.webp";

#[async_trait]
#[automock]
pub trait ImageGenerator {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Forwards post-image prompts to the upstream completion endpoint.
///
/// The upstream model cannot emit images yet, so this client only validates
/// the round trip and hands back [`PLACEHOLDER_IMAGE_URL`].
/// TODO: return the generated asset URL once the image pipeline exists.
pub struct PromptProxyClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl PromptProxyClient {
    pub fn new(endpoint: String, api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
            api_key,
        }
    }
}

#[async_trait]
impl ImageGenerator for PromptProxyClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let body = json!({
            "model": "gpt-4.1-mini",
            "messages": [{
                "role": "user",
                "content": format!(
                    "Generate a high-quality, professional image for a Google Business \
                     Profile post. The image should be business appropriate, engaging, \
                     and related to: {prompt}"
                ),
            }],
            "max_tokens": 100,
        });

        let resp = self
            .http
            .post(&self.endpoint)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();

            error!(
                status = %status,
                response_body = %body,
                "image prompt proxy request failed"
            );

            anyhow::bail!("image prompt proxy request failed with status {}", status);
        }

        Ok(PLACEHOLDER_IMAGE_URL.to_string())
    }
}

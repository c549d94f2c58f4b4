use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use tracing::error;

const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";

#[derive(Debug, Clone, Deserialize)]
pub struct RefreshedAccessToken {
    pub access_token: String,
    /// Lifetime of the new token in seconds.
    pub expires_in: i64,
}

#[async_trait]
#[automock]
pub trait TokenExchange {
    async fn exchange_refresh_token(&self, refresh_token: &str) -> Result<RefreshedAccessToken>;
}

/// Exchanges refresh tokens against Google's OAuth token endpoint.
pub struct GoogleOauthClient {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
}

impl GoogleOauthClient {
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            client_id,
            client_secret,
        }
    }
}

#[async_trait]
impl TokenExchange for GoogleOauthClient {
    async fn exchange_refresh_token(&self, refresh_token: &str) -> Result<RefreshedAccessToken> {
        let body = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ];

        let resp = self
            .http
            .post(TOKEN_ENDPOINT)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .form(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = match resp.text().await {
                Ok(text) if !text.is_empty() => text,
                Ok(_) => "<empty response body>".to_string(),
                Err(err) => format!("<failed to read response body: {err}>"),
            };

            error!(
                status = %status,
                response_body = %body,
                "google oauth refresh token exchange failed"
            );

            anyhow::bail!("refresh token exchange failed with status {}", status);
        }

        let refreshed: RefreshedAccessToken = resp.json().await?;
        Ok(refreshed)
    }
}

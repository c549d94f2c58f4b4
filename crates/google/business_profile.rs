use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use thiserror::Error;
use tracing::error;

use crate::google::local_posts::LocalPost;

const INFORMATION_BASE_URL: &str = "https://mybusinessbusinessinformation.googleapis.com/v1";
const LOCAL_POSTS_BASE_URL: &str = "https://mybusiness.googleapis.com/v4";

/// Non-2xx reply from the Business Profile API. Callers log and translate
/// this into a generic 500; the body never reaches the client.
#[derive(Debug, Error)]
#[error("google business profile request failed: {context} (status {status})")]
pub struct ApiFailure {
    pub status: u16,
    pub context: &'static str,
    pub body: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AccountsResponse {
    #[serde(default)]
    pub accounts: Vec<Account>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub name: String,
    pub account_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LocationsResponse {
    #[serde(default)]
    pub locations: Vec<Location>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub name: String,
    pub title: Option<String>,
    pub storefront_address: Option<PostalAddress>,
    pub primary_phone: Option<String>,
    pub website_url: Option<String>,
    pub primary_category: Option<LocationCategory>,
    pub metadata: Option<LocationMetadata>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostalAddress {
    #[serde(default)]
    pub address_lines: Vec<String>,
    pub locality: Option<String>,
    pub administrative_area: Option<String>,
    pub postal_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationCategory {
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationMetadata {
    pub maps_url: Option<String>,
}

impl Location {
    /// Single-line postal address the way the dashboard displays it.
    pub fn formatted_address(&self) -> Option<String> {
        let address = self.storefront_address.as_ref()?;
        let mut parts = Vec::new();

        let lines = address.address_lines.join(", ");
        if !lines.is_empty() {
            parts.push(lines);
        }
        if let Some(locality) = address.locality.as_deref() {
            parts.push(locality.to_string());
        }
        let region = match (
            address.administrative_area.as_deref(),
            address.postal_code.as_deref(),
        ) {
            (Some(area), Some(postal)) => format!("{} {}", area, postal),
            (Some(area), None) => area.to_string(),
            (None, Some(postal)) => postal.to_string(),
            (None, None) => String::new(),
        };
        if !region.is_empty() {
            parts.push(region);
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LocalPostsResponse {
    #[serde(default)]
    pub local_posts: Vec<RemoteLocalPost>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteLocalPost {
    pub name: String,
    pub summary: Option<String>,
    pub state: Option<String>,
}

#[async_trait]
#[automock]
pub trait BusinessProfileApi {
    async fn list_accounts(&self, access_token: &str) -> Result<AccountsResponse>;

    async fn list_locations(
        &self,
        access_token: &str,
        account_name: &str,
    ) -> Result<LocationsResponse>;

    /// Creates a local post under the location and returns its provider name.
    async fn create_local_post(
        &self,
        access_token: &str,
        location_name: &str,
        local_post: &LocalPost,
    ) -> Result<String>;

    async fn list_local_posts(
        &self,
        access_token: &str,
        location_name: &str,
    ) -> Result<LocalPostsResponse>;

    async fn delete_local_post(&self, access_token: &str, post_name: &str) -> Result<()>;
}

/// Minimal Business Profile client built on reqwest. The access token is
/// passed per call because each request may run under a different user.
pub struct BusinessProfileClient {
    http: reqwest::Client,
}

impl BusinessProfileClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    async fn ensure_success(
        resp: reqwest::Response,
        context: &'static str,
    ) -> Result<reqwest::Response> {
        if resp.status().is_success() {
            return Ok(resp);
        }

        let status = resp.status();
        let body = match resp.text().await {
            Ok(text) if !text.is_empty() => text,
            Ok(_) => "<empty response body>".to_string(),
            Err(err) => format!("<failed to read response body: {err}>"),
        };

        error!(
            status = %status,
            response_body = %body,
            context = %context,
            "google business profile request failed"
        );

        Err(ApiFailure {
            status: status.as_u16(),
            context,
            body,
        }
        .into())
    }
}

impl Default for BusinessProfileClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BusinessProfileApi for BusinessProfileClient {
    async fn list_accounts(&self, access_token: &str) -> Result<AccountsResponse> {
        let resp = self
            .http
            .get(format!("{}/accounts", INFORMATION_BASE_URL))
            .header(AUTHORIZATION, format!("Bearer {}", access_token))
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;
        let resp = Self::ensure_success(resp, "list accounts").await?;

        Ok(resp.json().await?)
    }

    async fn list_locations(
        &self,
        access_token: &str,
        account_name: &str,
    ) -> Result<LocationsResponse> {
        let resp = self
            .http
            .get(format!(
                "{}/{}/locations",
                INFORMATION_BASE_URL, account_name
            ))
            .header(AUTHORIZATION, format!("Bearer {}", access_token))
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;
        let resp = Self::ensure_success(resp, "list locations").await?;

        Ok(resp.json().await?)
    }

    async fn create_local_post(
        &self,
        access_token: &str,
        location_name: &str,
        local_post: &LocalPost,
    ) -> Result<String> {
        let resp = self
            .http
            .post(format!(
                "{}/{}/localPosts",
                LOCAL_POSTS_BASE_URL, location_name
            ))
            .header(AUTHORIZATION, format!("Bearer {}", access_token))
            .header(CONTENT_TYPE, "application/json")
            .json(local_post)
            .send()
            .await?;
        let resp = Self::ensure_success(resp, "create local post").await?;

        #[derive(Deserialize)]
        struct CreatedLocalPost {
            name: Option<String>,
        }

        let parsed: CreatedLocalPost = resp.json().await?;
        parsed
            .name
            .ok_or_else(|| anyhow::anyhow!("created local post name is missing"))
    }

    async fn list_local_posts(
        &self,
        access_token: &str,
        location_name: &str,
    ) -> Result<LocalPostsResponse> {
        let resp = self
            .http
            .get(format!(
                "{}/{}/localPosts",
                LOCAL_POSTS_BASE_URL, location_name
            ))
            .header(AUTHORIZATION, format!("Bearer {}", access_token))
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;
        let resp = Self::ensure_success(resp, "list local posts").await?;

        Ok(resp.json().await?)
    }

    async fn delete_local_post(&self, access_token: &str, post_name: &str) -> Result<()> {
        let resp = self
            .http
            .delete(format!("{}/{}", LOCAL_POSTS_BASE_URL, post_name))
            .header(AUTHORIZATION, format!("Bearer {}", access_token))
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;
        Self::ensure_success(resp, "delete local post").await?;

        Ok(())
    }
}

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::oauth_credentials::OauthCredentialEntity;

#[async_trait]
#[automock]
pub trait OauthCredentialRepository {
    async fn find_by_user_and_provider(
        &self,
        user_id: Uuid,
        provider: &str,
    ) -> Result<Option<OauthCredentialEntity>>;

    async fn update_access_token(
        &self,
        credential_id: Uuid,
        access_token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<()>;
}

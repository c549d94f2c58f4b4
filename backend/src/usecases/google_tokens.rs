use anyhow::Result;
use chrono::{Duration, Utc};
use crates::{
    domain::repositories::oauth_credentials::OauthCredentialRepository,
    google::oauth::TokenExchange,
};
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

pub const GOOGLE_PROVIDER: &str = "google";

/// Hands out a live provider access token for a user, refreshing the stored
/// credential when it has expired.
pub struct GoogleTokenService<C, X>
where
    C: OauthCredentialRepository + Send + Sync + 'static,
    X: TokenExchange + Send + Sync + 'static,
{
    credential_repo: Arc<C>,
    token_exchange: Arc<X>,
}

impl<C, X> GoogleTokenService<C, X>
where
    C: OauthCredentialRepository + Send + Sync + 'static,
    X: TokenExchange + Send + Sync + 'static,
{
    pub fn new(credential_repo: Arc<C>, token_exchange: Arc<X>) -> Self {
        Self {
            credential_repo,
            token_exchange,
        }
    }

    /// `None` means the user has no usable provider credential and must be
    /// treated as unauthenticated with the provider (401, never 500).
    pub async fn access_token_for_user(&self, user_id: Uuid) -> Result<Option<String>> {
        let Some(credential) = self
            .credential_repo
            .find_by_user_and_provider(user_id, GOOGLE_PROVIDER)
            .await?
        else {
            return Ok(None);
        };

        let Some(access_token) = credential.access_token.clone() else {
            return Ok(None);
        };

        let expired = credential
            .expires_at
            .is_some_and(|expires_at| expires_at <= Utc::now());
        if !expired {
            return Ok(Some(access_token));
        }

        let Some(refresh_token) = credential.refresh_token.clone() else {
            return Ok(None);
        };

        match self
            .token_exchange
            .exchange_refresh_token(&refresh_token)
            .await
        {
            Ok(refreshed) => {
                let expires_at = Utc::now() + Duration::seconds(refreshed.expires_in);
                self.credential_repo
                    .update_access_token(credential.id, &refreshed.access_token, expires_at)
                    .await?;
                Ok(Some(refreshed.access_token))
            }
            Err(err) => {
                warn!(%user_id, error = ?err, "google tokens: refresh token exchange failed");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use crates::{
        domain::{
            entities::oauth_credentials::OauthCredentialEntity,
            repositories::oauth_credentials::MockOauthCredentialRepository,
        },
        google::oauth::{MockTokenExchange, RefreshedAccessToken},
    };
    use mockall::predicate::eq;

    fn sample_credential(
        user_id: Uuid,
        access_token: Option<&str>,
        refresh_token: Option<&str>,
        expires_at: Option<DateTime<Utc>>,
    ) -> OauthCredentialEntity {
        let now = Utc::now();
        OauthCredentialEntity {
            id: Uuid::new_v4(),
            user_id,
            provider: GOOGLE_PROVIDER.to_string(),
            access_token: access_token.map(|t| t.to_string()),
            refresh_token: refresh_token.map(|t| t.to_string()),
            expires_at,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn returns_stored_token_while_unexpired() {
        let user_id = Uuid::new_v4();

        let mut credential_repo = MockOauthCredentialRepository::new();
        let token_exchange = MockTokenExchange::new();

        let expires_at = Some(Utc::now() + Duration::hours(1));
        credential_repo
            .expect_find_by_user_and_provider()
            .with(eq(user_id), eq(GOOGLE_PROVIDER))
            .returning(move |_, _| {
                let credential =
                    sample_credential(user_id, Some("stored-token"), Some("refresh-123"), expires_at);
                Box::pin(async move { Ok(Some(credential)) })
            });

        let service = GoogleTokenService::new(Arc::new(credential_repo), Arc::new(token_exchange));
        let token = service.access_token_for_user(user_id).await.unwrap();

        assert_eq!(token.as_deref(), Some("stored-token"));
    }

    #[tokio::test]
    async fn refreshes_expired_token_and_moves_expiry_forward() {
        let user_id = Uuid::new_v4();

        let mut credential_repo = MockOauthCredentialRepository::new();
        let mut token_exchange = MockTokenExchange::new();

        let expires_at = Some(Utc::now() - Duration::minutes(5));
        credential_repo
            .expect_find_by_user_and_provider()
            .returning(move |_, _| {
                let credential =
                    sample_credential(user_id, Some("stale-token"), Some("refresh-123"), expires_at);
                Box::pin(async move { Ok(Some(credential)) })
            });

        token_exchange
            .expect_exchange_refresh_token()
            .withf(|refresh_token| refresh_token == "refresh-123")
            .returning(|_| {
                Box::pin(async {
                    Ok(RefreshedAccessToken {
                        access_token: "fresh-token".to_string(),
                        expires_in: 3600,
                    })
                })
            });

        credential_repo
            .expect_update_access_token()
            .withf(|_, access_token, expires_at| {
                access_token == "fresh-token" && *expires_at > Utc::now()
            })
            .returning(|_, _, _| Box::pin(async { Ok(()) }));

        let service = GoogleTokenService::new(Arc::new(credential_repo), Arc::new(token_exchange));
        let token = service.access_token_for_user(user_id).await.unwrap();

        assert_eq!(token.as_deref(), Some("fresh-token"));
    }

    #[tokio::test]
    async fn missing_credential_yields_none() {
        let user_id = Uuid::new_v4();

        let mut credential_repo = MockOauthCredentialRepository::new();
        let token_exchange = MockTokenExchange::new();

        credential_repo
            .expect_find_by_user_and_provider()
            .returning(|_, _| Box::pin(async { Ok(None) }));

        let service = GoogleTokenService::new(Arc::new(credential_repo), Arc::new(token_exchange));
        let token = service.access_token_for_user(user_id).await.unwrap();

        assert!(token.is_none());
    }

    #[tokio::test]
    async fn failed_refresh_yields_none() {
        let user_id = Uuid::new_v4();

        let mut credential_repo = MockOauthCredentialRepository::new();
        let mut token_exchange = MockTokenExchange::new();

        let expires_at = Some(Utc::now() - Duration::minutes(5));
        credential_repo
            .expect_find_by_user_and_provider()
            .returning(move |_, _| {
                let credential =
                    sample_credential(user_id, Some("stale-token"), Some("refresh-123"), expires_at);
                Box::pin(async move { Ok(Some(credential)) })
            });

        token_exchange
            .expect_exchange_refresh_token()
            .returning(|_| Box::pin(async { Err(anyhow::anyhow!("invalid_grant")) }));

        let service = GoogleTokenService::new(Arc::new(credential_repo), Arc::new(token_exchange));
        let token = service.access_token_for_user(user_id).await.unwrap();

        assert!(token.is_none());
    }
}

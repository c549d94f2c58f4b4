use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::{prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::oauth_credentials::OauthCredentialEntity,
        repositories::oauth_credentials::OauthCredentialRepository,
    },
    infra::db::postgres::{postgres_connection::PgPoolSquad, schema::oauth_credentials},
};

pub struct OauthCredentialPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl OauthCredentialPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl OauthCredentialRepository for OauthCredentialPostgres {
    async fn find_by_user_and_provider(
        &self,
        user_id: Uuid,
        provider: &str,
    ) -> Result<Option<OauthCredentialEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = oauth_credentials::table
            .filter(oauth_credentials::user_id.eq(user_id))
            .filter(oauth_credentials::provider.eq(provider))
            .select(OauthCredentialEntity::as_select())
            .first::<OauthCredentialEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn update_access_token(
        &self,
        credential_id: Uuid,
        access_token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(oauth_credentials::table)
            .filter(oauth_credentials::id.eq(credential_id))
            .set((
                oauth_credentials::access_token.eq(Some(access_token.to_string())),
                oauth_credentials::expires_at.eq(Some(expires_at)),
                oauth_credentials::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)?;

        Ok(())
    }
}

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infra::db::postgres::schema::oauth_credentials;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = oauth_credentials)]
pub struct OauthCredentialEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub provider: String,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

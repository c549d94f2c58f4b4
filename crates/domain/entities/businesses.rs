use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infra::db::postgres::schema::businesses;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = businesses)]
pub struct BusinessEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub google_id: String,
    pub name: String,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub website_url: Option<String>,
    pub category: Option<String>,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = businesses)]
pub struct InsertBusinessEntity {
    pub user_id: Uuid,
    pub google_id: String,
    pub name: String,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub website_url: Option<String>,
    pub category: Option<String>,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields refreshed on every provider sync. The owning user never changes
/// once the row exists.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = businesses)]
#[diesel(treat_none_as_null = true)]
pub struct RefreshBusinessEntity {
    pub name: String,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub website_url: Option<String>,
    pub category: Option<String>,
    pub is_verified: bool,
    pub updated_at: DateTime<Utc>,
}

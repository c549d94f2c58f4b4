use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infra::db::postgres::schema::posts;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = posts)]
pub struct PostEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub business_id: Option<Uuid>,
    pub title: String,
    pub content: String,
    pub type_: String,
    pub status: String,
    pub image_url: Option<String>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub event_start_date: Option<DateTime<Utc>>,
    pub event_end_date: Option<DateTime<Utc>>,
    pub event_location: Option<String>,
    pub offer_valid_until: Option<DateTime<Utc>>,
    pub offer_terms: Option<String>,
    pub google_post_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = posts)]
pub struct InsertPostEntity {
    pub user_id: Uuid,
    pub business_id: Option<Uuid>,
    pub title: String,
    pub content: String,
    pub type_: String,
    pub status: String,
    pub image_url: Option<String>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub event_start_date: Option<DateTime<Utc>>,
    pub event_end_date: Option<DateTime<Utc>>,
    pub event_location: Option<String>,
    pub offer_valid_until: Option<DateTime<Utc>>,
    pub offer_terms: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full-replace changeset for PUT updates. `None` clears the column, which is
/// how clearing `scheduled_at` drops a post back to draft.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = posts)]
#[diesel(treat_none_as_null = true)]
pub struct EditPostEntity {
    pub title: String,
    pub content: String,
    pub type_: String,
    pub status: String,
    pub image_url: Option<String>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub event_start_date: Option<DateTime<Utc>>,
    pub event_end_date: Option<DateTime<Utc>>,
    pub event_location: Option<String>,
    pub offer_valid_until: Option<DateTime<Utc>>,
    pub offer_terms: Option<String>,
    pub updated_at: DateTime<Utc>,
}

use chrono::{DateTime, Utc};
use crates::{
    domain::{
        entities::businesses::{BusinessEntity, InsertBusinessEntity},
        repositories::{
            businesses::BusinessRepository, oauth_credentials::OauthCredentialRepository,
        },
    },
    google::{
        business_profile::{BusinessProfileApi, Location},
        oauth::TokenExchange,
    },
};
use serde::Serialize;
use std::sync::Arc;
use tracing::error;
use uuid::Uuid;

use crate::axum_http::error_responses::AppError;
use crate::usecases::google_tokens::GoogleTokenService;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessDto {
    pub id: Uuid,
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

impl From<BusinessEntity> for BusinessDto {
    fn from(entity: BusinessEntity) -> Self {
        Self {
            id: entity.id,
            google_id: entity.google_id,
            name: entity.name,
            address: entity.address,
            phone_number: entity.phone_number,
            website_url: entity.website_url,
            category: entity.category,
            is_verified: entity.is_verified,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

fn insert_entity_from_location(user_id: Uuid, location: &Location) -> InsertBusinessEntity {
    let now = Utc::now();
    InsertBusinessEntity {
        user_id,
        google_id: location.name.clone(),
        name: location
            .title
            .clone()
            .unwrap_or_else(|| location.name.clone()),
        address: location.formatted_address(),
        phone_number: location.primary_phone.clone(),
        website_url: location.website_url.clone(),
        category: location
            .primary_category
            .as_ref()
            .and_then(|category| category.display_name.clone()),
        // A maps URL only exists once the provider has verified the listing.
        is_verified: location
            .metadata
            .as_ref()
            .is_some_and(|metadata| metadata.maps_url.is_some()),
        created_at: now,
        updated_at: now,
    }
}

pub struct BusinessesUseCase<B, C, X, A>
where
    B: BusinessRepository + Send + Sync + 'static,
    C: OauthCredentialRepository + Send + Sync + 'static,
    X: TokenExchange + Send + Sync + 'static,
    A: BusinessProfileApi + Send + Sync + 'static,
{
    business_repo: Arc<B>,
    token_service: Arc<GoogleTokenService<C, X>>,
    profile_api: Arc<A>,
}

impl<B, C, X, A> BusinessesUseCase<B, C, X, A>
where
    B: BusinessRepository + Send + Sync + 'static,
    C: OauthCredentialRepository + Send + Sync + 'static,
    X: TokenExchange + Send + Sync + 'static,
    A: BusinessProfileApi + Send + Sync + 'static,
{
    pub fn new(
        business_repo: Arc<B>,
        token_service: Arc<GoogleTokenService<C, X>>,
        profile_api: Arc<A>,
    ) -> Self {
        Self {
            business_repo,
            token_service,
            profile_api,
        }
    }

    /// Pulls every location the user can manage and mirrors it locally.
    /// A failing account is skipped so one bad account cannot hide the rest.
    pub async fn sync_from_google(&self, user_id: Uuid) -> Result<Vec<BusinessDto>, AppError> {
        let access_token = self
            .token_service
            .access_token_for_user(user_id)
            .await?
            .ok_or(AppError::Unauthorized)?;

        let accounts = self.profile_api.list_accounts(&access_token).await?;

        let mut businesses = Vec::new();
        for account in accounts.accounts {
            let locations = match self
                .profile_api
                .list_locations(&access_token, &account.name)
                .await
            {
                Ok(locations) => locations,
                Err(err) => {
                    error!(
                        account = %account.name,
                        error = ?err,
                        "businesses: failed to list locations, skipping account"
                    );
                    continue;
                }
            };

            for location in locations.locations {
                let business = self
                    .business_repo
                    .upsert_by_google_id(insert_entity_from_location(user_id, &location))
                    .await?;
                businesses.push(business.into());
            }
        }

        Ok(businesses)
    }
}

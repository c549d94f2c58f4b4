use anyhow::Result;
use async_trait::async_trait;
use diesel::{insert_into, prelude::*};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::businesses::{BusinessEntity, InsertBusinessEntity, RefreshBusinessEntity},
        repositories::businesses::BusinessRepository,
    },
    infra::db::postgres::{postgres_connection::PgPoolSquad, schema::businesses},
};

pub struct BusinessPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl BusinessPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl BusinessRepository for BusinessPostgres {
    async fn find_by_id(&self, business_id: Uuid) -> Result<Option<BusinessEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = businesses::table
            .find(business_id)
            .select(BusinessEntity::as_select())
            .first::<BusinessEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn upsert_by_google_id(
        &self,
        insert_business_entity: InsertBusinessEntity,
    ) -> Result<BusinessEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let refresh_business_entity = RefreshBusinessEntity {
            name: insert_business_entity.name.clone(),
            address: insert_business_entity.address.clone(),
            phone_number: insert_business_entity.phone_number.clone(),
            website_url: insert_business_entity.website_url.clone(),
            category: insert_business_entity.category.clone(),
            is_verified: insert_business_entity.is_verified,
            updated_at: insert_business_entity.updated_at,
        };

        let result = insert_into(businesses::table)
            .values(&insert_business_entity)
            .on_conflict(businesses::google_id)
            .do_update()
            .set(&refresh_business_entity)
            .returning(BusinessEntity::as_returning())
            .get_result::<BusinessEntity>(&mut conn)?;

        Ok(result)
    }
}

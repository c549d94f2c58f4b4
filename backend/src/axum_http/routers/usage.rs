use crate::{auth::AuthUser, usecases::usage::UsageUseCase};
use axum::{Json, Router, extract::State, response::IntoResponse, routing::get};
use crates::{
    domain::repositories::{
        usage_records::UsageRecordRepository, users::UserRepository,
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::{usage_records::UsageRecordPostgres, users::UserPostgres},
    },
};
use std::sync::Arc;
use tracing::error;

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let user_repository = UserPostgres::new(Arc::clone(&db_pool));
    let usage_repository = UsageRecordPostgres::new(Arc::clone(&db_pool));

    let usecase = UsageUseCase::new(Arc::new(user_repository), Arc::new(usage_repository));

    Router::new()
        .route("/", get(monthly_usage))
        .with_state(Arc::new(usecase))
}

pub async fn monthly_usage<U, G>(
    State(usecase): State<Arc<UsageUseCase<U, G>>>,
    AuthUser { user_id, .. }: AuthUser,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
    G: UsageRecordRepository + Send + Sync + 'static,
{
    match usecase.monthly_usage(user_id).await {
        Ok(stats) => Json(stats).into_response(),
        Err(err) => {
            error!(%user_id, error = ?err, "usage: failed to load monthly usage");
            err.into_response()
        }
    }
}

use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;
use tirta_core::accounts::{Account, AccountUpdate, NewAccount};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountQuery {
    is_active: Option<bool>,
}

async fn list_accounts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AccountQuery>,
) -> ApiResult<Json<Vec<Account>>> {
    let accounts = state.account_service.list_accounts(query.is_active)?;
    Ok(Json(accounts))
}

async fn create_account(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewAccount>,
) -> ApiResult<(StatusCode, Json<Account>)> {
    let created = state.account_service.create_account(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_account(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(mut payload): Json<AccountUpdate>,
) -> ApiResult<Json<Account>> {
    payload.id = Some(id);
    let updated = state.account_service.update_account(payload).await?;
    Ok(Json(updated))
}

async fn delete_account(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.account_service.delete_account(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/accounts", get(list_accounts).post(create_account))
        .route("/accounts/{id}", put(update_account).delete(delete_account))
}

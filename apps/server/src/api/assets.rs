use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tirta_core::{
    assets::{Asset, AssetUpdate, NewAsset},
    depreciation::DepreciationAmounts,
    utils::Period,
};

async fn list_assets(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Asset>>> {
    Ok(Json(state.asset_service.get_assets()?))
}

async fn get_asset(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Asset>> {
    Ok(Json(state.asset_service.get_asset(&id)?))
}

async fn create_asset(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewAsset>,
) -> ApiResult<(StatusCode, Json<Asset>)> {
    let created = state.asset_service.create_asset(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_asset(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(mut payload): Json<AssetUpdate>,
) -> ApiResult<Json<Asset>> {
    payload.id = Some(id);
    Ok(Json(state.asset_service.update_asset(payload).await?))
}

async fn delete_asset(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.asset_service.delete_asset(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
struct ScheduleQuery {
    through: Option<Period>,
}

/// Month-by-month schedule, through December of the current year by default.
async fn get_schedule(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ScheduleQuery>,
) -> ApiResult<Json<Vec<DepreciationAmounts>>> {
    let through = query
        .through
        .unwrap_or_else(|| Period::current().end_of_year());
    Ok(Json(state.asset_service.get_schedule(&id, through)?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/assets", get(list_assets).post(create_asset))
        .route(
            "/assets/{id}",
            get(get_asset).put(update_asset).delete(delete_asset),
        )
        .route("/assets/{id}/schedule", get(get_schedule))
}

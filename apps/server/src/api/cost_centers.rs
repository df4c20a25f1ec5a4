use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use tirta_core::cost_centers::{CostCenter, NewCostCenter};

async fn list_cost_centers(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<CostCenter>>> {
    Ok(Json(state.cost_center_service.get_cost_centers()?))
}

async fn create_cost_center(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewCostCenter>,
) -> ApiResult<(StatusCode, Json<CostCenter>)> {
    let created = state.cost_center_service.create_cost_center(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn delete_cost_center(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.cost_center_service.delete_cost_center(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/cost-centers",
            get(list_cost_centers).post(create_cost_center),
        )
        .route("/cost-centers/{id}", delete(delete_cost_center))
}

use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tirta_core::{
    depreciation::{DepreciationLine, DepreciationRunResult, LineFilter},
    utils::Period,
};
use tracing::info;

#[derive(Debug, Deserialize)]
struct PeriodBody {
    period: Period,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RollbackResponse {
    period: Period,
    removed: usize,
}

async fn run_depreciation(
    State(state): State<Arc<AppState>>,
    Json(body): Json<PeriodBody>,
) -> ApiResult<Json<DepreciationRunResult>> {
    let result = state.depreciation_service.run_depreciation(body.period).await?;
    info!(
        "Depreciation run {}: {} created, {} skipped, {} errors",
        result.period,
        result.created,
        result.skipped,
        result.errors.len()
    );
    Ok(Json(result))
}

async fn rollback_run(
    State(state): State<Arc<AppState>>,
    Json(body): Json<PeriodBody>,
) -> ApiResult<Json<RollbackResponse>> {
    let removed = state.depreciation_service.rollback_run(body.period).await?;
    Ok(Json(RollbackResponse {
        period: body.period,
        removed,
    }))
}

async fn list_lines(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<LineFilter>,
) -> ApiResult<Json<Vec<DepreciationLine>>> {
    Ok(Json(state.depreciation_service.list_lines(&filter)?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/depreciation/run", post(run_depreciation))
        .route("/depreciation/rollback", post(rollback_run))
        .route("/depreciation/lines", get(list_lines))
}

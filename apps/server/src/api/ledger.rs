//! General ledger routes: listing, posting, unposting and previews.

use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde::Deserialize;
use tirta_core::ledger::{
    GlFilter, GlHeaderDetail, GlHeaderSummary, PostRequest, PostResult, PostingPreview,
    SourceCandidate, SourceFilter, SourceRef, SourceType,
};
use tracing::info;

/// `?type=jurnal|penyusutan&id=...`
#[derive(Debug, Deserialize)]
struct SourceQuery {
    #[serde(rename = "type")]
    source_type: String,
    id: String,
}

impl SourceQuery {
    fn into_source(self) -> ApiResult<SourceRef> {
        let source_type: SourceType = self.source_type.parse()?;
        Ok(SourceRef::new(source_type, self.id))
    }
}

async fn list_headers(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<GlFilter>,
) -> ApiResult<Json<Vec<GlHeaderSummary>>> {
    Ok(Json(state.posting_service.list(&filter)?))
}

async fn get_header(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<GlHeaderDetail>> {
    Ok(Json(state.posting_service.detail(&id)?))
}

async fn unpost(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SourceQuery>,
) -> ApiResult<StatusCode> {
    let source = query.into_source()?;
    state.posting_service.unpost(&source).await?;
    info!("Unposted {}", source);
    Ok(StatusCode::NO_CONTENT)
}

async fn list_sources(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<SourceFilter>,
) -> ApiResult<Json<Vec<SourceCandidate>>> {
    Ok(Json(state.posting_service.sources(&filter)?))
}

async fn preview(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SourceQuery>,
) -> ApiResult<Json<PostingPreview>> {
    let source = query.into_source()?;
    Ok(Json(state.posting_service.preview(&source)?))
}

async fn post_batch(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PostRequest>,
) -> ApiResult<Json<PostResult>> {
    Ok(Json(state.posting_service.post(request).await?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/gl", get(list_headers))
        .route("/gl/unpost", delete(unpost))
        .route("/gl/sources", get(list_sources))
        .route("/gl/preview", get(preview))
        .route("/gl/post", post(post_batch))
        .route("/gl/{id}", get(get_header))
}

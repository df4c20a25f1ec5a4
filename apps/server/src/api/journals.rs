use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use tirta_core::journals::{
    JournalCategory, JournalCategoryUpdate, JournalEntry, JournalEntryUpdate, JournalFilter,
    NewJournalCategory, NewJournalEntry,
};

async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<JournalCategory>>> {
    Ok(Json(state.journal_service.get_categories()?))
}

async fn create_category(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewJournalCategory>,
) -> ApiResult<(StatusCode, Json<JournalCategory>)> {
    let created = state.journal_service.create_category(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_category(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(mut payload): Json<JournalCategoryUpdate>,
) -> ApiResult<Json<JournalCategory>> {
    payload.id = Some(id);
    Ok(Json(state.journal_service.update_category(payload).await?))
}

async fn delete_category(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.journal_service.delete_category(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_entries(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<JournalFilter>,
) -> ApiResult<Json<Vec<JournalEntry>>> {
    Ok(Json(state.journal_service.get_entries(&filter)?))
}

async fn get_entry(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<JournalEntry>> {
    Ok(Json(state.journal_service.get_entry(&id)?))
}

async fn create_entry(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewJournalEntry>,
) -> ApiResult<(StatusCode, Json<JournalEntry>)> {
    let created = state.journal_service.create_entry(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_entry(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(mut payload): Json<JournalEntryUpdate>,
) -> ApiResult<Json<JournalEntry>> {
    payload.id = Some(id);
    Ok(Json(state.journal_service.update_entry(payload).await?))
}

async fn delete_entry(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.journal_service.delete_entry(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/journal-categories",
            get(list_categories).post(create_category),
        )
        .route(
            "/journal-categories/{id}",
            put(update_category).delete(delete_category),
        )
        .route("/journals", get(list_entries).post(create_entry))
        .route(
            "/journals/{id}",
            get(get_entry).put(update_entry).delete(delete_entry),
        )
}

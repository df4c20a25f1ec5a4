use std::sync::Arc;

use crate::{config::Config, error::ApiResult, main_lib::AppState};
use anyhow::Context;
use axum::{extract::State, http::HeaderValue, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

pub mod accounts;
pub mod assets;
pub mod cost_centers;
pub mod depreciation;
pub mod journals;
pub mod ledger;
pub mod reports;

pub async fn healthz() -> &'static str {
    "ok"
}

/// Ready once the database answers.
pub async fn readyz(State(state): State<Arc<AppState>>) -> ApiResult<&'static str> {
    let pool = state.pool.clone();
    tokio::task::spawn_blocking(move || tirta_storage_sqlite::ping(&pool))
        .await
        .context("Readiness probe task failed")??;
    Ok("ok")
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> anyhow::Result<Router> {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .with_context(|| format!("Invalid CORS origin {}", o))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        CorsLayer::new().allow_origin(origins)
    };

    let api = Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .merge(accounts::router())
        .merge(cost_centers::router())
        .merge(assets::router())
        .merge(depreciation::router())
        .merge(journals::router())
        .merge(ledger::router())
        .merge(reports::router());

    Ok(Router::new()
        .nest("/api/v1", api)
        .with_state(state)
        .layer(cors)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http()))
}

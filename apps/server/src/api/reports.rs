//! Reports ("laporan"): depreciation and balance sheet.

use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use tirta_core::{
    balance_sheet::BalanceSheet,
    depreciation::{ReportFormat, ReportKind},
    ledger::Segment,
    utils::Period,
};

#[derive(Debug, Deserialize)]
struct DepreciationReportQuery {
    #[serde(rename = "type")]
    kind: Option<String>,
    format: Option<String>,
    period: Option<Period>,
}

async fn depreciation_report(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DepreciationReportQuery>,
) -> ApiResult<Response> {
    let kind: ReportKind = query.kind.as_deref().unwrap_or("rekap").parse()?;
    let format: ReportFormat = query.format.as_deref().unwrap_or("json").parse()?;

    match format {
        ReportFormat::Json => {
            let report = state.depreciation_service.get_report(kind, query.period)?;
            Ok(Json(report).into_response())
        }
        ReportFormat::Csv => {
            let bytes = state
                .depreciation_service
                .export_report_csv(kind, query.period)?;
            let kind_name = match kind {
                ReportKind::Rekap => "rekap",
                ReportKind::Detail => "detail",
            };
            let disposition = format!(
                "attachment; filename=\"laporan-penyusutan-{}.csv\"",
                kind_name
            );
            Ok((
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                bytes,
            )
                .into_response())
        }
        ReportFormat::Pdf => Err(ApiError::NotImplemented(
            "PDF export is not available; use format=csv or format=json".to_string(),
        )),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BalanceSheetQuery {
    as_of: Option<NaiveDate>,
    cost_center_id: Option<String>,
    asset_id: Option<String>,
}

async fn balance_sheet(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BalanceSheetQuery>,
) -> ApiResult<Json<BalanceSheet>> {
    let segment = match (query.cost_center_id, query.asset_id) {
        (None, None) => Segment::All,
        (Some(cost_center_id), None) => Segment::CostCenter(cost_center_id),
        (None, Some(asset_id)) => Segment::Asset(asset_id),
        (Some(_), Some(_)) => {
            return Err(ApiError::BadRequest(
                "Filter by costCenterId or assetId, not both".to_string(),
            ))
        }
    };
    let as_of = query.as_of.unwrap_or_else(|| Local::now().date_naive());
    Ok(Json(
        state
            .balance_sheet_service
            .get_balance_sheet(as_of, segment)?,
    ))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/laporan/penyusutan", get(depreciation_report))
        .route("/laporan/neraca", get(balance_sheet))
}

//! Depreciation report assembly and CSV rendering.

use std::collections::{BTreeMap, HashMap};

use csv::{QuoteStyle, WriterBuilder};
use log::warn;
use rust_decimal::Decimal;
use serde::Serialize;

use super::depreciation_calculator::calculate;
use super::depreciation_model::{
    DepreciationClass, DepreciationLine, DepreciationReport, DepreciationReportRow,
    DepreciationSummaryRow, DepreciationTotals, LineOrigin, ReportKind,
};
use crate::assets::Asset;
use crate::errors::{Error, Result};
use crate::utils::Period;

const UNCLASSIFIED_LABEL: &str = "Tanpa Golongan";

/// Builds a report as of `period`.
///
/// `stored` maps asset id to the persisted line of exactly `period`. Assets
/// without one are calculated on the fly with the same calculator the run
/// uses, so both paths agree to the cent. Assets acquired after the period
/// are left out.
pub fn build_report(
    kind: ReportKind,
    period: Period,
    assets: &[Asset],
    stored: &HashMap<String, DepreciationLine>,
) -> DepreciationReport {
    let rows: Vec<DepreciationReportRow> = assets
        .iter()
        .filter(|asset| asset.acquisition_date <= period.last_day())
        .map(|asset| report_row(asset, period, stored.get(&asset.id)))
        .collect();

    // Inputs are bounded by MAX_MONEY; saturation only guards rows loaded
    // from outside that bound.
    let totals = rows.iter().fold(DepreciationTotals::default(), |mut acc, row| {
        acc.acquisition_value = acc.acquisition_value.saturating_add(row.acquisition_value);
        acc.expense = acc.expense.saturating_add(row.expense);
        acc.accumulated = acc.accumulated.saturating_add(row.accumulated);
        acc.book_value = acc.book_value.saturating_add(row.book_value);
        acc
    });

    match kind {
        ReportKind::Detail => DepreciationReport {
            kind,
            period,
            rows,
            summary: Vec::new(),
            totals,
        },
        ReportKind::Rekap => DepreciationReport {
            kind,
            period,
            rows: Vec::new(),
            summary: summarize(&rows),
            totals,
        },
    }
}

fn report_row(
    asset: &Asset,
    period: Period,
    stored: Option<&DepreciationLine>,
) -> DepreciationReportRow {
    let (expense, accumulated, book_value, origin, posted) = match stored {
        Some(line) => (
            line.expense,
            line.accumulated,
            line.book_value,
            LineOrigin::Stored,
            line.posted,
        ),
        None => match calculate(&asset.depreciation_params(), period) {
            Ok(amounts) => (
                amounts.expense,
                amounts.accumulated,
                amounts.book_value,
                LineOrigin::Synthesized,
                false,
            ),
            Err(e) => {
                warn!(
                    "Depreciation of asset {} for {} could not be calculated: {}",
                    asset.code, period, e
                );
                (
                    Decimal::ZERO,
                    Decimal::ZERO,
                    asset.acquisition_value,
                    LineOrigin::Fallback,
                    false,
                )
            }
        },
    };

    DepreciationReportRow {
        asset_id: asset.id.clone(),
        asset_code: asset.code.clone(),
        asset_name: asset.name.clone(),
        depreciation_class: asset.depreciation_class,
        method: asset.method,
        acquisition_value: asset.acquisition_value,
        residual_value: asset.residual_value,
        expense,
        accumulated,
        book_value,
        origin,
        posted,
    }
}

/// Groups rows by class in class order; unclassified assets come last.
fn summarize(rows: &[DepreciationReportRow]) -> Vec<DepreciationSummaryRow> {
    let mut groups: BTreeMap<(bool, Option<DepreciationClass>), DepreciationSummaryRow> =
        BTreeMap::new();

    for row in rows {
        let class = row.depreciation_class;
        let entry = groups
            .entry((class.is_none(), class))
            .or_insert_with(|| DepreciationSummaryRow {
                depreciation_class: class,
                label: class
                    .map(|c| c.label().to_string())
                    .unwrap_or_else(|| UNCLASSIFIED_LABEL.to_string()),
                asset_count: 0,
                acquisition_value: Decimal::ZERO,
                expense: Decimal::ZERO,
                accumulated: Decimal::ZERO,
                book_value: Decimal::ZERO,
            });
        entry.asset_count += 1;
        entry.acquisition_value = entry.acquisition_value.saturating_add(row.acquisition_value);
        entry.expense = entry.expense.saturating_add(row.expense);
        entry.accumulated = entry.accumulated.saturating_add(row.accumulated);
        entry.book_value = entry.book_value.saturating_add(row.book_value);
    }

    groups.into_values().collect()
}

#[derive(Serialize)]
struct DetailCsvRow<'a> {
    #[serde(rename = "Kode Aset")]
    code: &'a str,
    #[serde(rename = "Nama Aset")]
    name: &'a str,
    #[serde(rename = "Golongan")]
    class: &'a str,
    #[serde(rename = "Metode")]
    method: &'a str,
    #[serde(rename = "Nilai Perolehan")]
    acquisition_value: String,
    #[serde(rename = "Nilai Residu")]
    residual_value: String,
    #[serde(rename = "Beban Periode")]
    expense: String,
    #[serde(rename = "Akumulasi Penyusutan")]
    accumulated: String,
    #[serde(rename = "Nilai Buku")]
    book_value: String,
    #[serde(rename = "Sumber")]
    origin: &'a str,
    #[serde(rename = "Status")]
    status: &'a str,
}

#[derive(Serialize)]
struct RekapCsvRow<'a> {
    #[serde(rename = "Golongan")]
    label: &'a str,
    #[serde(rename = "Jumlah Aset")]
    asset_count: usize,
    #[serde(rename = "Nilai Perolehan")]
    acquisition_value: String,
    #[serde(rename = "Beban Periode")]
    expense: String,
    #[serde(rename = "Akumulasi Penyusutan")]
    accumulated: String,
    #[serde(rename = "Nilai Buku")]
    book_value: String,
}

// Serialized rows emit their own header; these cover empty reports.
const DETAIL_HEADERS: [&str; 11] = [
    "Kode Aset",
    "Nama Aset",
    "Golongan",
    "Metode",
    "Nilai Perolehan",
    "Nilai Residu",
    "Beban Periode",
    "Akumulasi Penyusutan",
    "Nilai Buku",
    "Sumber",
    "Status",
];
const REKAP_HEADERS: [&str; 6] = [
    "Golongan",
    "Jumlah Aset",
    "Nilai Perolehan",
    "Beban Periode",
    "Akumulasi Penyusutan",
    "Nilai Buku",
];

fn money(value: Decimal) -> String {
    format!("{:.2}", value)
}

/// Renders the report as CSV with every field quoted and a header row.
pub fn render_csv(report: &DepreciationReport) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    match report.kind {
        ReportKind::Detail => {
            if report.rows.is_empty() {
                writer.write_record(DETAIL_HEADERS)?;
            }
            for row in &report.rows {
                writer.serialize(DetailCsvRow {
                    code: &row.asset_code,
                    name: &row.asset_name,
                    class: row
                        .depreciation_class
                        .map(|c| c.label())
                        .unwrap_or(UNCLASSIFIED_LABEL),
                    method: row.method.label(),
                    acquisition_value: money(row.acquisition_value),
                    residual_value: money(row.residual_value),
                    expense: money(row.expense),
                    accumulated: money(row.accumulated),
                    book_value: money(row.book_value),
                    origin: row.origin.label(),
                    status: if row.posted { "Posted" } else { "Belum Posting" },
                })?;
            }
        }
        ReportKind::Rekap => {
            if report.summary.is_empty() {
                writer.write_record(REKAP_HEADERS)?;
            }
            for row in &report.summary {
                writer.serialize(RekapCsvRow {
                    label: &row.label,
                    asset_count: row.asset_count,
                    acquisition_value: money(row.acquisition_value),
                    expense: money(row.expense),
                    accumulated: money(row.accumulated),
                    book_value: money(row.book_value),
                })?;
            }
        }
    }

    writer
        .into_inner()
        .map_err(|e| Error::Report(e.to_string()))
}

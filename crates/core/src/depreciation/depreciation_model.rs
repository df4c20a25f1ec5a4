//! Depreciation domain models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_MONEY, MAX_USEFUL_LIFE_MONTHS};
use crate::errors::{CalculatorError, Error, Result, ValidationError};
use crate::ledger::PostingStatus;
use crate::utils::Period;

/// How an asset's cost is spread over its useful life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepreciationMethod {
    StraightLine,
    DecliningBalance,
}

impl DepreciationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            DepreciationMethod::StraightLine => "straight_line",
            DepreciationMethod::DecliningBalance => "declining_balance",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DepreciationMethod::StraightLine => "Garis Lurus",
            DepreciationMethod::DecliningBalance => "Saldo Menurun",
        }
    }
}

impl FromStr for DepreciationMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "straight_line" => Ok(DepreciationMethod::StraightLine),
            "declining_balance" => Ok(DepreciationMethod::DecliningBalance),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown depreciation method '{}'",
                other
            )))),
        }
    }
}

/// Depreciation class ("golongan"), each a bracket of useful life and
/// declining-balance rate. Buildings only depreciate straight-line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepreciationClass {
    Group1,
    Group2,
    Group3,
    Group4,
    BuildingPermanent,
    BuildingNonPermanent,
}

impl DepreciationClass {
    pub fn useful_life_months(&self) -> u32 {
        match self {
            DepreciationClass::Group1 => 48,
            DepreciationClass::Group2 => 96,
            DepreciationClass::Group3 => 192,
            DepreciationClass::Group4 => 240,
            DepreciationClass::BuildingPermanent => 240,
            DepreciationClass::BuildingNonPermanent => 120,
        }
    }

    /// Annual declining-balance rate, if the class allows that method.
    pub fn declining_rate(&self) -> Option<Decimal> {
        match self {
            DepreciationClass::Group1 => Some(dec!(0.50)),
            DepreciationClass::Group2 => Some(dec!(0.25)),
            DepreciationClass::Group3 => Some(dec!(0.125)),
            DepreciationClass::Group4 => Some(dec!(0.10)),
            DepreciationClass::BuildingPermanent | DepreciationClass::BuildingNonPermanent => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DepreciationClass::Group1 => "group_1",
            DepreciationClass::Group2 => "group_2",
            DepreciationClass::Group3 => "group_3",
            DepreciationClass::Group4 => "group_4",
            DepreciationClass::BuildingPermanent => "building_permanent",
            DepreciationClass::BuildingNonPermanent => "building_non_permanent",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DepreciationClass::Group1 => "Golongan 1",
            DepreciationClass::Group2 => "Golongan 2",
            DepreciationClass::Group3 => "Golongan 3",
            DepreciationClass::Group4 => "Golongan 4",
            DepreciationClass::BuildingPermanent => "Bangunan Permanen",
            DepreciationClass::BuildingNonPermanent => "Bangunan Tidak Permanen",
        }
    }
}

impl fmt::Display for DepreciationClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DepreciationClass {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "group_1" => Ok(DepreciationClass::Group1),
            "group_2" => Ok(DepreciationClass::Group2),
            "group_3" => Ok(DepreciationClass::Group3),
            "group_4" => Ok(DepreciationClass::Group4),
            "building_permanent" => Ok(DepreciationClass::BuildingPermanent),
            "building_non_permanent" => Ok(DepreciationClass::BuildingNonPermanent),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown depreciation class '{}'",
                other
            )))),
        }
    }
}

/// Everything the calculator needs to know about an asset.
#[derive(Debug, Clone, PartialEq)]
pub struct DepreciationParams {
    pub acquisition_value: Decimal,
    pub residual_value: Decimal,
    pub useful_life_months: Option<u32>,
    /// First period that carries depreciation.
    pub start: Period,
    pub method: DepreciationMethod,
    pub class: Option<DepreciationClass>,
    /// Annual rate; overrides the class rate for declining balance.
    pub declining_rate: Option<Decimal>,
}

impl DepreciationParams {
    pub fn validate(&self) -> Result<()> {
        if self.acquisition_value < Decimal::ZERO {
            return Err(CalculatorError::NegativeAcquisition.into());
        }
        if self.residual_value < Decimal::ZERO {
            return Err(CalculatorError::NegativeResidual.into());
        }
        for value in [self.acquisition_value, self.residual_value] {
            if value > MAX_MONEY {
                return Err(CalculatorError::AmountTooLarge(value.to_string()).into());
            }
        }
        if let Some(months) = self.useful_life_months.filter(|m| *m > MAX_USEFUL_LIFE_MONTHS) {
            return Err(CalculatorError::UsefulLifeTooLong(months).into());
        }
        if self.method == DepreciationMethod::DecliningBalance {
            let rate = self.annual_rate().ok_or(CalculatorError::MissingRate)?;
            if rate <= Decimal::ZERO || rate > Decimal::ONE {
                return Err(CalculatorError::InvalidRate(rate.to_string()).into());
            }
        }
        Ok(())
    }

    /// Explicit rate first, then the class rate.
    pub fn annual_rate(&self) -> Option<Decimal> {
        self.declining_rate
            .or_else(|| self.class.and_then(|c| c.declining_rate()))
    }

    pub fn depreciable_amount(&self) -> Decimal {
        (self.acquisition_value - self.residual_value).max(Decimal::ZERO)
    }
}

/// Expense for one period together with the position after it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepreciationAmounts {
    pub period: Period,
    pub expense: Decimal,
    pub accumulated: Decimal,
    pub book_value: Decimal,
}

/// A persisted depreciation line for one asset and one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepreciationLine {
    pub id: String,
    pub asset_id: String,
    pub period: Period,
    pub expense: Decimal,
    pub accumulated: Decimal,
    pub book_value: Decimal,
    /// Derived from the ledger on every read.
    pub posted: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewDepreciationLine {
    pub asset_id: String,
    pub period: Period,
    pub expense: Decimal,
    pub accumulated: Decimal,
    pub book_value: Decimal,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineFilter {
    pub asset_id: Option<String>,
    pub period: Option<Period>,
    pub from: Option<Period>,
    pub to: Option<Period>,
    pub status: Option<PostingStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RunError {
    pub asset_id: String,
    pub asset_code: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DepreciationRunResult {
    pub period: Period,
    pub created: usize,
    pub skipped: usize,
    pub errors: Vec<RunError>,
}

/// Shape of a depreciation report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    /// Totals per depreciation class.
    Rekap,
    /// One row per asset.
    Detail,
}

impl FromStr for ReportKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "rekap" => Ok(ReportKind::Rekap),
            "detail" => Ok(ReportKind::Detail),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown report type '{}'",
                other
            )))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Json,
    Csv,
    Pdf,
}

impl FromStr for ReportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ReportFormat::Json),
            "csv" => Ok(ReportFormat::Csv),
            "pdf" => Ok(ReportFormat::Pdf),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown report format '{}'",
                other
            )))),
        }
    }
}

/// Where a report row's figures come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineOrigin {
    Stored,
    Synthesized,
    /// The asset could not be calculated; figures are zero.
    Fallback,
}

impl LineOrigin {
    pub fn label(&self) -> &'static str {
        match self {
            LineOrigin::Stored => "Tersimpan",
            LineOrigin::Synthesized => "Proyeksi",
            LineOrigin::Fallback => "Gagal Hitung",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepreciationReportRow {
    pub asset_id: String,
    pub asset_code: String,
    pub asset_name: String,
    pub depreciation_class: Option<DepreciationClass>,
    pub method: DepreciationMethod,
    pub acquisition_value: Decimal,
    pub residual_value: Decimal,
    pub expense: Decimal,
    pub accumulated: Decimal,
    pub book_value: Decimal,
    pub origin: LineOrigin,
    pub posted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepreciationSummaryRow {
    pub depreciation_class: Option<DepreciationClass>,
    pub label: String,
    pub asset_count: usize,
    pub acquisition_value: Decimal,
    pub expense: Decimal,
    pub accumulated: Decimal,
    pub book_value: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepreciationTotals {
    pub acquisition_value: Decimal,
    pub expense: Decimal,
    pub accumulated: Decimal,
    pub book_value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepreciationReport {
    pub kind: ReportKind,
    pub period: Period,
    /// Filled for `detail` reports.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rows: Vec<DepreciationReportRow>,
    /// Filled for `rekap` reports.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub summary: Vec<DepreciationSummaryRow>,
    pub totals: DepreciationTotals,
}

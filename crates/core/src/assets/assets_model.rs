//! Fixed-asset domain models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::MAX_MONEY;
use crate::depreciation::{DepreciationClass, DepreciationMethod, DepreciationParams};
use crate::errors::{Error, Result, ValidationError};
use crate::utils::Period;

/// Domain model representing a registered fixed asset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub code: String,
    pub name: String,
    pub acquisition_date: NaiveDate,
    pub acquisition_value: Decimal,
    pub residual_value: Decimal,
    /// Zero or missing falls back to the class life, then to the default life.
    pub useful_life_months: Option<u32>,
    pub depreciation_start: NaiveDate,
    pub method: DepreciationMethod,
    pub depreciation_class: Option<DepreciationClass>,
    /// Annual rate overriding the class rate for declining balance.
    pub declining_rate: Option<Decimal>,
    pub expense_account_id: Option<String>,
    pub accumulated_account_id: Option<String>,
    pub cost_center_id: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Asset {
    pub fn depreciation_params(&self) -> DepreciationParams {
        DepreciationParams {
            acquisition_value: self.acquisition_value,
            residual_value: self.residual_value,
            useful_life_months: self.useful_life_months,
            start: Period::from_date(self.depreciation_start),
            method: self.method,
            class: self.depreciation_class,
            declining_rate: self.declining_rate,
        }
    }

    /// True when `other` would depreciate differently from `self`.
    pub fn valuation_differs(&self, other: &AssetUpdate) -> bool {
        self.acquisition_value != other.acquisition_value
            || self.residual_value != other.residual_value
            || self.useful_life_months != other.useful_life_months
            || self.depreciation_start != other.depreciation_start
            || self.method != other.method
            || self.depreciation_class != other.depreciation_class
            || self.declining_rate != other.declining_rate
    }
}

/// Input model for registering a new asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAsset {
    pub id: Option<String>,
    pub code: String,
    pub name: String,
    pub acquisition_date: NaiveDate,
    pub acquisition_value: Decimal,
    #[serde(default)]
    pub residual_value: Decimal,
    pub useful_life_months: Option<u32>,
    /// Defaults to the acquisition date.
    pub depreciation_start: Option<NaiveDate>,
    pub method: DepreciationMethod,
    pub depreciation_class: Option<DepreciationClass>,
    pub declining_rate: Option<Decimal>,
    pub expense_account_id: Option<String>,
    pub accumulated_account_id: Option<String>,
    pub cost_center_id: Option<String>,
}

impl NewAsset {
    pub fn validate(&self) -> Result<()> {
        validate_identity(&self.code, &self.name)?;
        validate_values(self.acquisition_value, self.residual_value)?;
        self.params().validate()
    }

    pub fn params(&self) -> DepreciationParams {
        DepreciationParams {
            acquisition_value: self.acquisition_value,
            residual_value: self.residual_value,
            useful_life_months: self.useful_life_months,
            start: Period::from_date(self.depreciation_start.unwrap_or(self.acquisition_date)),
            method: self.method,
            class: self.depreciation_class,
            declining_rate: self.declining_rate,
        }
    }
}

/// Input model for correcting an existing asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetUpdate {
    pub id: Option<String>,
    pub code: String,
    pub name: String,
    pub acquisition_date: NaiveDate,
    pub acquisition_value: Decimal,
    pub residual_value: Decimal,
    pub useful_life_months: Option<u32>,
    pub depreciation_start: NaiveDate,
    pub method: DepreciationMethod,
    pub depreciation_class: Option<DepreciationClass>,
    pub declining_rate: Option<Decimal>,
    pub expense_account_id: Option<String>,
    pub accumulated_account_id: Option<String>,
    pub cost_center_id: Option<String>,
    pub is_active: bool,
}

impl AssetUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.id.is_none() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Asset ID is required for updates".to_string(),
            )));
        }
        validate_identity(&self.code, &self.name)?;
        validate_values(self.acquisition_value, self.residual_value)?;
        DepreciationParams {
            acquisition_value: self.acquisition_value,
            residual_value: self.residual_value,
            useful_life_months: self.useful_life_months,
            start: Period::from_date(self.depreciation_start),
            method: self.method,
            class: self.depreciation_class,
            declining_rate: self.declining_rate,
        }
        .validate()
    }
}

fn validate_identity(code: &str, name: &str) -> Result<()> {
    if code.trim().is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "code".to_string(),
        )));
    }
    if name.trim().is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "name".to_string(),
        )));
    }
    Ok(())
}

fn validate_values(acquisition: Decimal, residual: Decimal) -> Result<()> {
    if acquisition > MAX_MONEY {
        return Err(Error::Validation(ValidationError::InvalidInput(format!(
            "Acquisition value cannot exceed {}",
            MAX_MONEY
        ))));
    }
    if residual > acquisition {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Residual value cannot exceed the acquisition value".to_string(),
        )));
    }
    Ok(())
}

//! Database model for assets.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::utils::{parse_decimal, parse_enum, parse_optional_decimal};
use tirta_core::assets::{Asset, AssetUpdate, NewAsset};
use tirta_core::errors::Error;

/// Database model for assets
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::assets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct AssetDB {
    pub id: String,
    pub code: String,
    pub name: String,
    pub acquisition_date: NaiveDate,
    pub acquisition_value: String,
    pub residual_value: String,
    pub useful_life_months: Option<i32>,
    pub depreciation_start: NaiveDate,
    pub method: String,
    pub depreciation_class: Option<String>,
    pub declining_rate: Option<String>,
    pub expense_account_id: Option<String>,
    pub accumulated_account_id: Option<String>,
    pub cost_center_id: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<AssetDB> for Asset {
    type Error = Error;

    fn try_from(db: AssetDB) -> Result<Self, Self::Error> {
        Ok(Self {
            acquisition_value: parse_decimal("acquisition_value", &db.acquisition_value)?,
            residual_value: parse_decimal("residual_value", &db.residual_value)?,
            useful_life_months: db
                .useful_life_months
                .and_then(|months| u32::try_from(months).ok()),
            method: parse_enum(&db.method)?,
            depreciation_class: db
                .depreciation_class
                .as_deref()
                .map(parse_enum)
                .transpose()?,
            declining_rate: parse_optional_decimal("declining_rate", db.declining_rate.as_deref())?,
            id: db.id,
            code: db.code,
            name: db.name,
            acquisition_date: db.acquisition_date,
            depreciation_start: db.depreciation_start,
            expense_account_id: db.expense_account_id,
            accumulated_account_id: db.accumulated_account_id,
            cost_center_id: db.cost_center_id,
            is_active: db.is_active,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

fn months_column(months: Option<u32>) -> Option<i32> {
    months.and_then(|m| i32::try_from(m).ok())
}

impl From<NewAsset> for AssetDB {
    fn from(domain: NewAsset) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: domain
                .id
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            code: domain.code.trim().to_string(),
            name: domain.name.trim().to_string(),
            acquisition_date: domain.acquisition_date,
            acquisition_value: domain.acquisition_value.to_string(),
            residual_value: domain.residual_value.to_string(),
            useful_life_months: months_column(domain.useful_life_months),
            depreciation_start: domain.depreciation_start.unwrap_or(domain.acquisition_date),
            method: domain.method.as_str().to_string(),
            depreciation_class: domain.depreciation_class.map(|c| c.as_str().to_string()),
            declining_rate: domain.declining_rate.map(|r| r.to_string()),
            expense_account_id: domain.expense_account_id,
            accumulated_account_id: domain.accumulated_account_id,
            cost_center_id: domain.cost_center_id,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<AssetUpdate> for AssetDB {
    fn from(domain: AssetUpdate) -> Self {
        Self {
            id: domain.id.unwrap_or_default(),
            code: domain.code.trim().to_string(),
            name: domain.name.trim().to_string(),
            acquisition_date: domain.acquisition_date,
            acquisition_value: domain.acquisition_value.to_string(),
            residual_value: domain.residual_value.to_string(),
            useful_life_months: months_column(domain.useful_life_months),
            depreciation_start: domain.depreciation_start,
            method: domain.method.as_str().to_string(),
            depreciation_class: domain.depreciation_class.map(|c| c.as_str().to_string()),
            declining_rate: domain.declining_rate.map(|r| r.to_string()),
            expense_account_id: domain.expense_account_id,
            accumulated_account_id: domain.accumulated_account_id,
            cost_center_id: domain.cost_center_id,
            is_active: domain.is_active,
            created_at: NaiveDateTime::default(), // filled from the existing record
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}

//! Database model for depreciation lines.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::utils::{parse_decimal, parse_enum};
use tirta_core::depreciation::{DepreciationLine, NewDepreciationLine};
use tirta_core::errors::Result;

/// Database model for depreciation lines. The posted flag is not a column;
/// it is looked up in `gl_lines` when the row is read.
#[derive(
    Queryable, Identifiable, Insertable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::depreciation_lines)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DepreciationLineDB {
    pub id: String,
    pub asset_id: String,
    pub period: String,
    pub expense: String,
    pub accumulated: String,
    pub book_value: String,
    pub created_at: NaiveDateTime,
}

impl DepreciationLineDB {
    pub fn into_domain(self, posted: bool) -> Result<DepreciationLine> {
        Ok(DepreciationLine {
            period: parse_enum(&self.period)?,
            expense: parse_decimal("expense", &self.expense)?,
            accumulated: parse_decimal("accumulated", &self.accumulated)?,
            book_value: parse_decimal("book_value", &self.book_value)?,
            id: self.id,
            asset_id: self.asset_id,
            posted,
            created_at: self.created_at,
        })
    }
}

impl From<NewDepreciationLine> for DepreciationLineDB {
    fn from(domain: NewDepreciationLine) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            asset_id: domain.asset_id,
            period: domain.period.to_string(),
            expense: domain.expense.to_string(),
            accumulated: domain.accumulated.to_string(),
            book_value: domain.book_value.to_string(),
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}

//! Database models for GL headers and lines.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::utils::{parse_decimal, parse_enum};
use tirta_core::errors::{DatabaseError, Error, Result};
use tirta_core::ledger::{GlHeader, GlLine, NewGlLine, SourceRef, SourceType};

#[derive(
    Queryable, Identifiable, Insertable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::gl_headers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GlHeaderDB {
    pub id: String,
    pub source_type: String,
    pub source_id: String,
    pub posting_date: NaiveDate,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
}

impl TryFrom<GlHeaderDB> for GlHeader {
    type Error = Error;

    fn try_from(db: GlHeaderDB) -> Result<Self> {
        let source_type: SourceType = parse_enum(&db.source_type)?;
        Ok(Self {
            id: db.id,
            source: SourceRef::new(source_type, db.source_id),
            posting_date: db.posting_date,
            description: db.description,
            created_at: db.created_at,
        })
    }
}

/// Database model for GL lines. Exactly one of the two source columns is set.
#[derive(
    Queryable, Identifiable, Insertable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::gl_lines)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GlLineDB {
    pub id: String,
    pub header_id: String,
    pub line_no: i32,
    pub account_id: String,
    pub cost_center_id: Option<String>,
    pub asset_id: Option<String>,
    pub debit: String,
    pub credit: String,
    pub memo: Option<String>,
    pub journal_entry_id: Option<String>,
    pub depreciation_line_id: Option<String>,
}

impl GlLineDB {
    pub fn new(header_id: &str, line_no: i32, source: &SourceRef, line: NewGlLine) -> Self {
        let (journal_entry_id, depreciation_line_id) = source_columns(source);
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            header_id: header_id.to_string(),
            line_no,
            account_id: line.account_id,
            cost_center_id: line.cost_center_id,
            asset_id: line.asset_id,
            debit: line.debit.to_string(),
            credit: line.credit.to_string(),
            memo: line.memo,
            journal_entry_id,
            depreciation_line_id,
        }
    }

    fn source(&self) -> Result<SourceRef> {
        match (&self.journal_entry_id, &self.depreciation_line_id) {
            (Some(id), None) => Ok(SourceRef::Journal(id.clone())),
            (None, Some(id)) => Ok(SourceRef::Depreciation(id.clone())),
            _ => Err(Error::Database(DatabaseError::Internal(format!(
                "GL line {} must reference exactly one source",
                self.id
            )))),
        }
    }
}

/// Splits a source reference into the (journal_entry_id, depreciation_line_id) columns.
pub fn source_columns(source: &SourceRef) -> (Option<String>, Option<String>) {
    match source {
        SourceRef::Journal(id) => (Some(id.clone()), None),
        SourceRef::Depreciation(id) => (None, Some(id.clone())),
    }
}

impl TryFrom<GlLineDB> for GlLine {
    type Error = Error;

    fn try_from(db: GlLineDB) -> Result<Self> {
        Ok(Self {
            source: db.source()?,
            debit: parse_decimal("debit", &db.debit)?,
            credit: parse_decimal("credit", &db.credit)?,
            id: db.id,
            header_id: db.header_id,
            line_no: db.line_no,
            account_id: db.account_id,
            cost_center_id: db.cost_center_id,
            asset_id: db.asset_id,
            memo: db.memo,
        })
    }
}

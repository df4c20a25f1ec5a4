//! Database models for journal categories and entries.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::utils::parse_decimal;
use tirta_core::errors::Result;
use tirta_core::journals::{
    JournalCategory, JournalCategoryUpdate, JournalEntry, JournalEntryUpdate, NewJournalCategory,
    NewJournalEntry,
};

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
#[diesel(table_name = crate::schema::journal_categories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct JournalCategoryDB {
    pub id: String,
    pub name: String,
    pub debit_account_id: String,
    pub credit_account_id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<JournalCategoryDB> for JournalCategory {
    fn from(db: JournalCategoryDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            debit_account_id: db.debit_account_id,
            credit_account_id: db.credit_account_id,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewJournalCategory> for JournalCategoryDB {
    fn from(domain: NewJournalCategory) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: domain
                .id
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            name: domain.name.trim().to_string(),
            debit_account_id: domain.debit_account_id,
            credit_account_id: domain.credit_account_id,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<JournalCategoryUpdate> for JournalCategoryDB {
    fn from(domain: JournalCategoryUpdate) -> Self {
        Self {
            id: domain.id.unwrap_or_default(),
            name: domain.name.trim().to_string(),
            debit_account_id: domain.debit_account_id,
            credit_account_id: domain.credit_account_id,
            created_at: NaiveDateTime::default(),
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}

/// Database model for journal entries. Posting state lives in `gl_lines`.
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
#[diesel(table_name = crate::schema::journal_entries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct JournalEntryDB {
    pub id: String,
    pub reference: String,
    pub entry_date: NaiveDate,
    pub category_id: String,
    pub description: Option<String>,
    pub amount: String,
    pub cost_center_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl JournalEntryDB {
    pub fn into_domain(self, posted: bool) -> Result<JournalEntry> {
        Ok(JournalEntry {
            amount: parse_decimal("amount", &self.amount)?,
            id: self.id,
            reference: self.reference,
            entry_date: self.entry_date,
            category_id: self.category_id,
            description: self.description,
            cost_center_id: self.cost_center_id,
            posted,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl From<NewJournalEntry> for JournalEntryDB {
    fn from(domain: NewJournalEntry) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: domain
                .id
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            reference: domain.reference.trim().to_string(),
            entry_date: domain.entry_date,
            category_id: domain.category_id,
            description: domain.description,
            amount: domain.amount.to_string(),
            cost_center_id: domain.cost_center_id,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<JournalEntryUpdate> for JournalEntryDB {
    fn from(domain: JournalEntryUpdate) -> Self {
        Self {
            id: domain.id.unwrap_or_default(),
            reference: domain.reference.trim().to_string(),
            entry_date: domain.entry_date,
            category_id: domain.category_id,
            description: domain.description,
            amount: domain.amount.to_string(),
            cost_center_id: domain.cost_center_id,
            created_at: NaiveDateTime::default(),
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}

//! Journal categories and journal entry domain models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::MAX_MONEY;
use crate::errors::{Error, Result, ValidationError};
use crate::ledger::PostingStatus;

/// Maps a kind of transaction onto the account pair it posts to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JournalCategory {
    pub id: String,
    pub name: String,
    pub debit_account_id: String,
    pub credit_account_id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJournalCategory {
    pub id: Option<String>,
    pub name: String,
    pub debit_account_id: String,
    pub credit_account_id: String,
}

impl NewJournalCategory {
    pub fn validate(&self) -> Result<()> {
        validate_category(&self.name, &self.debit_account_id, &self.credit_account_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalCategoryUpdate {
    pub id: Option<String>,
    pub name: String,
    pub debit_account_id: String,
    pub credit_account_id: String,
}

impl JournalCategoryUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.id.is_none() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Category ID is required for updates".to_string(),
            )));
        }
        validate_category(&self.name, &self.debit_account_id, &self.credit_account_id)
    }
}

fn validate_category(name: &str, debit_account_id: &str, credit_account_id: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "name".to_string(),
        )));
    }
    if debit_account_id.trim().is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "debitAccountId".to_string(),
        )));
    }
    if credit_account_id.trim().is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "creditAccountId".to_string(),
        )));
    }
    if debit_account_id == credit_account_id {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Debit and credit accounts must differ".to_string(),
        )));
    }
    Ok(())
}

/// A user-entered source document, posted to the ledger on request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: String,
    pub reference: String,
    pub entry_date: NaiveDate,
    pub category_id: String,
    pub description: Option<String>,
    pub amount: Decimal,
    pub cost_center_id: Option<String>,
    /// Derived from the ledger on every read.
    pub posted: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJournalEntry {
    pub id: Option<String>,
    pub reference: String,
    pub entry_date: NaiveDate,
    pub category_id: String,
    pub description: Option<String>,
    pub amount: Decimal,
    pub cost_center_id: Option<String>,
}

impl NewJournalEntry {
    pub fn validate(&self) -> Result<()> {
        validate_entry(&self.reference, &self.category_id, self.amount)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntryUpdate {
    pub id: Option<String>,
    pub reference: String,
    pub entry_date: NaiveDate,
    pub category_id: String,
    pub description: Option<String>,
    pub amount: Decimal,
    pub cost_center_id: Option<String>,
}

impl JournalEntryUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.id.is_none() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Journal entry ID is required for updates".to_string(),
            )));
        }
        validate_entry(&self.reference, &self.category_id, self.amount)
    }
}

fn validate_entry(reference: &str, category_id: &str, amount: Decimal) -> Result<()> {
    if reference.trim().is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "reference".to_string(),
        )));
    }
    if category_id.trim().is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "categoryId".to_string(),
        )));
    }
    if amount <= Decimal::ZERO {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Amount must be greater than zero".to_string(),
        )));
    }
    if amount > MAX_MONEY {
        return Err(Error::Validation(ValidationError::InvalidInput(format!(
            "Amount cannot exceed {}",
            MAX_MONEY
        ))));
    }
    Ok(())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    /// Matches the reference or the description.
    pub q: Option<String>,
    pub status: Option<PostingStatus>,
}

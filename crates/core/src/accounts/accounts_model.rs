//! Ledger account domain models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{errors::ValidationError, Error, Result};

/// Balance-sheet or income-statement class of a ledger account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    Asset,
    Liability,
    Equity,
    Revenue,
    Expense,
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Asset => "asset",
            AccountKind::Liability => "liability",
            AccountKind::Equity => "equity",
            AccountKind::Revenue => "revenue",
            AccountKind::Expense => "expense",
        }
    }

    fn natural_side(&self) -> NormalSide {
        match self {
            AccountKind::Asset | AccountKind::Expense => NormalSide::Debit,
            AccountKind::Liability | AccountKind::Equity | AccountKind::Revenue => {
                NormalSide::Credit
            }
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asset" => Ok(AccountKind::Asset),
            "liability" => Ok(AccountKind::Liability),
            "equity" => Ok(AccountKind::Equity),
            "revenue" => Ok(AccountKind::Revenue),
            "expense" => Ok(AccountKind::Expense),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown account kind '{}'",
                other
            )))),
        }
    }
}

/// Side on which an account's balance normally grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalSide {
    Debit,
    Credit,
}

impl NormalSide {
    fn flipped(self) -> Self {
        match self {
            NormalSide::Debit => NormalSide::Credit,
            NormalSide::Credit => NormalSide::Debit,
        }
    }
}

/// Domain model representing a ledger account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub code: String,
    pub name: String,
    pub kind: AccountKind,
    /// Contra accounts (accumulated depreciation, sales returns) offset their section.
    pub is_contra: bool,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Account {
    /// Normal balance side, with contra accounts on the opposite side of their kind.
    pub fn normal_side(&self) -> NormalSide {
        let side = self.kind.natural_side();
        if self.is_contra {
            side.flipped()
        } else {
            side
        }
    }

    /// Balance of the given movements, positive when on the normal side.
    pub fn signed_balance(&self, debit: Decimal, credit: Decimal) -> Decimal {
        match self.normal_side() {
            NormalSide::Debit => debit - credit,
            NormalSide::Credit => credit - debit,
        }
    }

    /// What this account adds to its section total: contra accounts subtract.
    pub fn section_amount(&self, debit: Decimal, credit: Decimal) -> Decimal {
        let balance = self.signed_balance(debit, credit);
        if self.is_contra {
            -balance
        } else {
            balance
        }
    }
}

/// Input model for creating a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub code: String,
    pub name: String,
    pub kind: AccountKind,
    #[serde(default)]
    pub is_contra: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl NewAccount {
    /// Validates the new account data.
    pub fn validate(&self) -> Result<()> {
        validate_code_and_name(&self.code, &self.name)
    }
}

/// Input model for updating an existing account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountUpdate {
    pub id: Option<String>,
    pub code: String,
    pub name: String,
    pub kind: AccountKind,
    pub is_contra: bool,
    pub is_active: bool,
}

impl AccountUpdate {
    /// Validates the account update data.
    pub fn validate(&self) -> Result<()> {
        if self.id.is_none() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Account ID is required for updates".to_string(),
            )));
        }
        validate_code_and_name(&self.code, &self.name)
    }
}

fn validate_code_and_name(code: &str, name: &str) -> Result<()> {
    if code.trim().is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "code".to_string(),
        )));
    }
    if name.trim().is_empty() {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Account name cannot be empty".to_string(),
        )));
    }
    Ok(())
}

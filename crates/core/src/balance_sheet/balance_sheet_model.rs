//! Balance sheet models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::accounts::AccountKind;
use crate::ledger::Segment;

/// One account's contribution to a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSheetRow {
    pub account_id: String,
    pub account_code: String,
    pub account_name: String,
    pub is_contra: bool,
    pub debit: Decimal,
    pub credit: Decimal,
    /// Signed toward the section: contra accounts are negative.
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSheetSection {
    pub kind: AccountKind,
    pub rows: Vec<BalanceSheetRow>,
    pub total: Decimal,
}

impl BalanceSheetSection {
    pub fn empty(kind: AccountKind) -> Self {
        Self {
            kind,
            rows: Vec::new(),
            total: Decimal::ZERO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSheet {
    pub as_of: NaiveDate,
    pub segment: Segment,
    pub assets: BalanceSheetSection,
    pub liabilities: BalanceSheetSection,
    pub equity: BalanceSheetSection,
    /// Revenue minus expense posted from January 1 of the as-of year.
    pub current_year_profit: Decimal,
    /// Revenue minus expense of earlier years not yet closed into equity.
    pub prior_years_profit: Decimal,
    pub total_assets: Decimal,
    pub total_liabilities: Decimal,
    /// Equity accounts plus both profit figures.
    pub total_equity: Decimal,
    pub total_liabilities_and_equity: Decimal,
    /// `total_assets - total_liabilities_and_equity`.
    pub difference: Decimal,
    pub balanced: bool,
}

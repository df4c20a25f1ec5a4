use chrono::NaiveDate;

use super::balance_sheet_model::BalanceSheet;
use crate::errors::Result;
use crate::ledger::Segment;

/// Trait defining the contract for balance sheet queries.
pub trait BalanceSheetServiceTrait: Send + Sync {
    fn get_balance_sheet(&self, as_of: NaiveDate, segment: Segment) -> Result<BalanceSheet>;
}

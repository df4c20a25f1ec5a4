use std::sync::Arc;

use chrono::NaiveDate;
use log::debug;

use super::balance_sheet_calculator::aggregate;
use super::balance_sheet_model::BalanceSheet;
use super::balance_sheet_traits::BalanceSheetServiceTrait;
use crate::accounts::AccountRepositoryTrait;
use crate::errors::Result;
use crate::ledger::{LedgerRepositoryTrait, Segment};

pub struct BalanceSheetService {
    account_repository: Arc<dyn AccountRepositoryTrait>,
    ledger_repository: Arc<dyn LedgerRepositoryTrait>,
}

impl BalanceSheetService {
    pub fn new(
        account_repository: Arc<dyn AccountRepositoryTrait>,
        ledger_repository: Arc<dyn LedgerRepositoryTrait>,
    ) -> Self {
        Self {
            account_repository,
            ledger_repository,
        }
    }
}

impl BalanceSheetServiceTrait for BalanceSheetService {
    fn get_balance_sheet(&self, as_of: NaiveDate, segment: Segment) -> Result<BalanceSheet> {
        // Inactive accounts still carry balances.
        let accounts = self.account_repository.list(None)?;
        let amounts = self.ledger_repository.load_postings(as_of, &segment)?;
        debug!(
            "Aggregating {} ledger lines as of {} for {:?}",
            amounts.len(),
            as_of,
            segment
        );
        Ok(aggregate(&accounts, &amounts, as_of, segment))
    }
}

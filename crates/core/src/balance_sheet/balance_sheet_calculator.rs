//! Pure balance sheet aggregation over posted ledger movements.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use log::warn;
use rust_decimal::Decimal;

use super::balance_sheet_model::{BalanceSheet, BalanceSheetRow, BalanceSheetSection};
use crate::accounts::{Account, AccountKind};
use crate::ledger::{PostedAmount, Segment};
use crate::utils::is_balanced;

#[derive(Default, Clone, Copy)]
struct Movement {
    debit: Decimal,
    credit: Decimal,
}

impl Movement {
    fn add(&mut self, amount: &PostedAmount) {
        self.debit += amount.debit;
        self.credit += amount.credit;
    }
}

/// Aggregates ledger movements up to and including `as_of` into a balance
/// sheet. Movements on accounts missing from `accounts` are logged and left
/// out.
pub fn aggregate(
    accounts: &[Account],
    amounts: &[PostedAmount],
    as_of: NaiveDate,
    segment: Segment,
) -> BalanceSheet {
    let by_id: HashMap<&str, &Account> = accounts.iter().map(|a| (a.id.as_str(), a)).collect();
    let year_start = NaiveDate::from_ymd_opt(as_of.year(), 1, 1).unwrap_or(as_of);

    let mut balances: HashMap<&str, Movement> = HashMap::new();
    let mut current_profit = Decimal::ZERO;
    let mut prior_profit = Decimal::ZERO;

    for amount in amounts.iter().filter(|a| a.posting_date <= as_of) {
        let Some(account) = by_id.get(amount.account_id.as_str()) else {
            warn!(
                "Ledger line on unknown account {} left out of the balance sheet",
                amount.account_id
            );
            continue;
        };
        match account.kind {
            AccountKind::Asset | AccountKind::Liability | AccountKind::Equity => {
                balances
                    .entry(account.id.as_str())
                    .or_default()
                    .add(amount);
            }
            AccountKind::Revenue | AccountKind::Expense => {
                let contribution = account.section_amount(amount.debit, amount.credit);
                let profit = if account.kind == AccountKind::Revenue {
                    contribution
                } else {
                    -contribution
                };
                if amount.posting_date >= year_start {
                    current_profit += profit;
                } else {
                    prior_profit += profit;
                }
            }
        }
    }

    let mut assets = BalanceSheetSection::empty(AccountKind::Asset);
    let mut liabilities = BalanceSheetSection::empty(AccountKind::Liability);
    let mut equity = BalanceSheetSection::empty(AccountKind::Equity);

    let mut ordered: Vec<&Account> = accounts
        .iter()
        .filter(|a| balances.contains_key(a.id.as_str()))
        .collect();
    ordered.sort_by(|a, b| a.code.cmp(&b.code));

    for account in ordered {
        let movement = balances[account.id.as_str()];
        let row = BalanceSheetRow {
            account_id: account.id.clone(),
            account_code: account.code.clone(),
            account_name: account.name.clone(),
            is_contra: account.is_contra,
            debit: movement.debit,
            credit: movement.credit,
            amount: account.section_amount(movement.debit, movement.credit),
        };
        let section = match account.kind {
            AccountKind::Asset => &mut assets,
            AccountKind::Liability => &mut liabilities,
            _ => &mut equity,
        };
        section.total += row.amount;
        section.rows.push(row);
    }

    let total_assets = assets.total;
    let total_liabilities = liabilities.total;
    let total_equity = equity.total + current_profit + prior_profit;
    let total_liabilities_and_equity = total_liabilities + total_equity;
    let difference = total_assets - total_liabilities_and_equity;

    BalanceSheet {
        as_of,
        segment,
        assets,
        liabilities,
        equity,
        current_year_profit: current_profit,
        prior_years_profit: prior_profit,
        total_assets,
        total_liabilities,
        total_equity,
        total_liabilities_and_equity,
        difference,
        balanced: is_balanced(total_assets, total_liabilities_and_equity),
    }
}

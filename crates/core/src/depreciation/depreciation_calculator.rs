//! Pure depreciation math.
//!
//! Every function here is a function of its inputs only: the same asset
//! parameters and period always produce the same amounts, which is what lets
//! reports synthesize lines that match the stored ones.
//!
//! * Straight-line: `(acquisition - residual) / life`, rounded to cents, every
//!   month. The last month of the life absorbs the rounding remainder.
//! * Declining-balance: `book value at month start * annual rate / 12`,
//!   rounded to cents and capped at the remaining depreciable amount. The last
//!   month of the life expenses whatever is left above the residual value.

use rust_decimal::Decimal;

use super::depreciation_model::{DepreciationAmounts, DepreciationMethod, DepreciationParams};
use crate::constants::{DEFAULT_USEFUL_LIFE_MONTHS, MONTHS_PER_YEAR, SCHEDULE_TAIL_MONTHS};
use crate::errors::{CalculatorError, Result};
use crate::utils::{round_money, Period};

/// Useful life in months: the asset's own value when positive, else its
/// class life, else the default.
pub fn resolve_useful_life(params: &DepreciationParams) -> u32 {
    match params.useful_life_months {
        Some(months) if months > 0 => months,
        _ => params
            .class
            .map(|c| c.useful_life_months())
            .unwrap_or(DEFAULT_USEFUL_LIFE_MONTHS),
    }
}

/// Expense recognized in `as_of` and the position at the end of it.
pub fn calculate(params: &DepreciationParams, as_of: Period) -> Result<DepreciationAmounts> {
    params.validate()?;
    let elapsed = params.start.months_until(as_of) + 1;
    if elapsed <= 0 {
        return Ok(DepreciationAmounts {
            period: as_of,
            expense: Decimal::ZERO,
            accumulated: Decimal::ZERO,
            book_value: params.acquisition_value,
        });
    }

    let life = resolve_useful_life(params);
    let elapsed = elapsed as u64;
    let expenses = monthly_expenses(params, life, elapsed.min(life as u64) as u32)?;
    let accumulated: Decimal = expenses.iter().copied().sum();
    let expense = if elapsed <= life as u64 {
        expenses.last().copied().unwrap_or(Decimal::ZERO)
    } else {
        Decimal::ZERO
    };

    Ok(DepreciationAmounts {
        period: as_of,
        expense,
        accumulated,
        book_value: params.acquisition_value - accumulated,
    })
}

/// Month-by-month amounts from the start period through `through`.
/// Months after the end of the life repeat the final position with no expense,
/// for at most `SCHEDULE_TAIL_MONTHS`.
pub fn schedule(params: &DepreciationParams, through: Period) -> Result<Vec<DepreciationAmounts>> {
    params.validate()?;
    let life = resolve_useful_life(params);
    let through = through.min(
        params
            .start
            .add_months(life as i64 + SCHEDULE_TAIL_MONTHS as i64 - 1),
    );
    let months = params.start.months_until(through) + 1;
    if months <= 0 {
        return Ok(Vec::new());
    }

    let expenses = monthly_expenses(params, life, (months as u64).min(life as u64) as u32)?;

    let mut accumulated = Decimal::ZERO;
    let rows = params
        .start
        .range_to(through)
        .enumerate()
        .map(|(index, period)| {
            let expense = expenses.get(index).copied().unwrap_or(Decimal::ZERO);
            accumulated += expense;
            DepreciationAmounts {
                period,
                expense,
                accumulated,
                book_value: params.acquisition_value - accumulated,
            }
        })
        .collect();
    Ok(rows)
}

/// Expenses for life months `1..=months` (callers cap `months` at `life`).
fn monthly_expenses(params: &DepreciationParams, life: u32, months: u32) -> Result<Vec<Decimal>> {
    let depreciable = params.depreciable_amount();
    let mut expenses = Vec::with_capacity(months as usize);
    let mut accumulated = Decimal::ZERO;

    match params.method {
        DepreciationMethod::StraightLine => {
            let monthly = round_money(depreciable / Decimal::from(life));
            for month in 1..=months {
                let remaining = depreciable - accumulated;
                let expense = if month == life {
                    remaining
                } else {
                    monthly.min(remaining)
                };
                accumulated += expense;
                expenses.push(expense);
            }
        }
        DepreciationMethod::DecliningBalance => {
            let annual_rate = params.annual_rate().ok_or(CalculatorError::MissingRate)?;
            let monthly_rate = annual_rate / Decimal::from(MONTHS_PER_YEAR);
            for month in 1..=months {
                let remaining = depreciable - accumulated;
                let expense = if month == life {
                    remaining
                } else {
                    let book_value = params.acquisition_value - accumulated;
                    round_money(book_value * monthly_rate).min(remaining)
                };
                accumulated += expense;
                expenses.push(expense);
            }
        }
    }

    Ok(expenses)
}

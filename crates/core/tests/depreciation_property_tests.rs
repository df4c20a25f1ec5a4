//! Property-based tests for the depreciation calculator.

use proptest::prelude::*;
use rust_decimal::Decimal;
use tirta_core::depreciation::depreciation_calculator::{calculate, schedule};
use tirta_core::depreciation::{DepreciationMethod, DepreciationParams};
use tirta_core::utils::{round_money, Period};

// =============================================================================
// Generators
// =============================================================================

/// Money amount in cents, up to one billion.
fn arb_money() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn arb_straight_line() -> impl Strategy<Value = DepreciationParams> {
    (arb_money(), 0u32..=100, 1u32..=240).prop_map(|(acquisition, residual_pct, life)| {
        DepreciationParams {
            acquisition_value: acquisition,
            residual_value: round_money(acquisition * Decimal::from(residual_pct) / Decimal::from(100)),
            useful_life_months: Some(life),
            start: Period::new(2020, 1).unwrap(),
            method: DepreciationMethod::StraightLine,
            class: None,
            declining_rate: None,
        }
    })
}

fn arb_declining() -> impl Strategy<Value = DepreciationParams> {
    (arb_money(), 0u32..=100, 1u32..=240, 1u32..=100).prop_map(
        |(acquisition, residual_pct, life, rate_pct)| DepreciationParams {
            acquisition_value: acquisition,
            residual_value: round_money(acquisition * Decimal::from(residual_pct) / Decimal::from(100)),
            useful_life_months: Some(life),
            start: Period::new(2020, 1).unwrap(),
            method: DepreciationMethod::DecliningBalance,
            class: None,
            declining_rate: Some(Decimal::from(rate_pct) / Decimal::from(100)),
        },
    )
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn straight_line_accumulates_monthly_amount_up_to_cap(
        params in arb_straight_line(),
        months in 1i64..300,
    ) {
        let life = params.useful_life_months.unwrap() as i64;
        let depreciable = params.acquisition_value - params.residual_value;
        let monthly = round_money(depreciable / Decimal::from(life));
        let as_of = params.start.add_months(months - 1);

        let amounts = calculate(&params, as_of).unwrap();
        let expected = if months >= life {
            depreciable
        } else {
            (monthly * Decimal::from(months)).min(depreciable)
        };
        prop_assert_eq!(amounts.accumulated, expected);
        prop_assert_eq!(amounts.book_value, params.acquisition_value - expected);
    }

    #[test]
    fn declining_balance_never_goes_below_residual(params in arb_declining()) {
        let life = params.useful_life_months.unwrap() as i64;
        let through = params.start.add_months(life + 6);
        let rows = schedule(&params, through).unwrap();

        for row in &rows {
            prop_assert!(row.book_value >= params.residual_value);
            prop_assert!(row.expense >= Decimal::ZERO);
        }
        let end_of_life = &rows[(life - 1) as usize];
        prop_assert_eq!(end_of_life.book_value, params.residual_value);
    }

    #[test]
    fn expenses_sum_to_accumulated(params in arb_declining(), months in 1i64..60) {
        let through = params.start.add_months(months - 1);
        let rows = schedule(&params, through).unwrap();
        let total: Decimal = rows.iter().map(|r| r.expense).sum();
        prop_assert_eq!(total, rows.last().unwrap().accumulated);
    }
}

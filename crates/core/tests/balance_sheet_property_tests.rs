//! Property-based tests for balance sheet aggregation.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use tirta_core::accounts::{Account, AccountKind};
use tirta_core::balance_sheet::aggregate;
use tirta_core::ledger::{PostedAmount, Segment};

fn chart() -> Vec<Account> {
    let created = NaiveDate::from_ymd_opt(2020, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    [
        ("cash", AccountKind::Asset, false),
        ("accum", AccountKind::Asset, true),
        ("loan", AccountKind::Liability, false),
        ("capital", AccountKind::Equity, false),
        ("sales", AccountKind::Revenue, false),
        ("returns", AccountKind::Revenue, true),
        ("expense", AccountKind::Expense, false),
    ]
    .into_iter()
    .map(|(id, kind, is_contra)| Account {
        id: id.to_string(),
        code: id.to_uppercase(),
        name: id.to_string(),
        kind,
        is_contra,
        is_active: true,
        created_at: created,
        updated_at: created,
    })
    .collect()
}

/// A balanced posting: one debit and one credit of the same amount.
fn arb_posting() -> impl Strategy<Value = [PostedAmount; 2]> {
    (0usize..7, 0usize..7, 1i64..10_000_000_00, 0u32..1500).prop_map(
        |(debit_index, credit_index, cents, day_offset)| {
            let ids = chart();
            let date = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap()
                + chrono::Duration::days(day_offset as i64);
            let amount = Decimal::new(cents, 2);
            [
                PostedAmount {
                    account_id: ids[debit_index].id.clone(),
                    posting_date: date,
                    debit: amount,
                    credit: Decimal::ZERO,
                },
                PostedAmount {
                    account_id: ids[credit_index].id.clone(),
                    posting_date: date,
                    debit: Decimal::ZERO,
                    credit: amount,
                },
            ]
        },
    )
}

proptest! {
    #[test]
    fn balanced_postings_always_balance(
        postings in prop::collection::vec(arb_posting(), 0..40),
        as_of_offset in 0i64..1500,
    ) {
        let as_of = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap() + chrono::Duration::days(as_of_offset);
        let amounts: Vec<PostedAmount> = postings.into_iter().flatten().collect();
        let sheet = aggregate(&chart(), &amounts, as_of, Segment::All);

        prop_assert_eq!(sheet.difference, Decimal::ZERO);
        prop_assert!(sheet.balanced);
    }

    #[test]
    fn one_sided_line_shows_up_as_difference(
        postings in prop::collection::vec(arb_posting(), 0..20),
        cents in 1i64..1_000_000,
    ) {
        let as_of = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        let mut amounts: Vec<PostedAmount> = postings.into_iter().flatten().collect();
        amounts.push(PostedAmount {
            account_id: "cash".to_string(),
            posting_date: as_of,
            debit: Decimal::new(cents, 2),
            credit: Decimal::ZERO,
        });
        let sheet = aggregate(&chart(), &amounts, as_of, Segment::All);

        prop_assert_eq!(sheet.difference, Decimal::new(cents, 2));
        prop_assert!(!sheet.balanced);
    }
}

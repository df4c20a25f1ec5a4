use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::{BALANCE_TOLERANCE, MONEY_DECIMAL_PRECISION};

/// Rounds an amount to cents, half away from zero.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(
        MONEY_DECIMAL_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    )
}

/// True when debit and credit totals differ by less than half a cent.
pub fn is_balanced(total_debit: Decimal, total_credit: Decimal) -> bool {
    (total_debit - total_credit).abs() < BALANCE_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_money(dec!(10.005)), dec!(10.01));
        assert_eq!(round_money(dec!(10.004)), dec!(10.00));
        assert_eq!(round_money(dec!(-10.005)), dec!(-10.01));
    }

    #[test]
    fn balance_tolerance_is_half_a_cent() {
        assert!(is_balanced(dec!(100.000), dec!(100.004)));
        assert!(!is_balanced(dec!(100.000), dec!(100.005)));
    }
}

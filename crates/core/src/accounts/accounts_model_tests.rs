//! Tests for account domain models including normal balance sides.

#[cfg(test)]
mod tests {
    use crate::accounts::{Account, AccountKind, NewAccount, NormalSide};
    use chrono::NaiveDateTime;
    use rust_decimal_macros::dec;

    fn create_test_account(kind: AccountKind, is_contra: bool) -> Account {
        Account {
            id: "acc-1".to_string(),
            code: "1.1.01".to_string(),
            name: "Test".to_string(),
            kind,
            is_contra,
            is_active: true,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    // ==================== Normal Side Tests ====================

    #[test]
    fn test_normal_side_by_kind() {
        assert_eq!(
            create_test_account(AccountKind::Asset, false).normal_side(),
            NormalSide::Debit
        );
        assert_eq!(
            create_test_account(AccountKind::Expense, false).normal_side(),
            NormalSide::Debit
        );
        assert_eq!(
            create_test_account(AccountKind::Liability, false).normal_side(),
            NormalSide::Credit
        );
        assert_eq!(
            create_test_account(AccountKind::Equity, false).normal_side(),
            NormalSide::Credit
        );
        assert_eq!(
            create_test_account(AccountKind::Revenue, false).normal_side(),
            NormalSide::Credit
        );
    }

    #[test]
    fn test_contra_flips_normal_side() {
        assert_eq!(
            create_test_account(AccountKind::Asset, true).normal_side(),
            NormalSide::Credit
        );
        assert_eq!(
            create_test_account(AccountKind::Revenue, true).normal_side(),
            NormalSide::Debit
        );
    }

    // ==================== Section Amount Tests ====================

    #[test]
    fn test_accumulated_depreciation_reduces_assets() {
        let accumulated = create_test_account(AccountKind::Asset, true);
        assert_eq!(accumulated.signed_balance(dec!(0), dec!(500)), dec!(500));
        assert_eq!(accumulated.section_amount(dec!(0), dec!(500)), dec!(-500));
    }

    #[test]
    fn test_regular_accounts_add_to_section() {
        let cash = create_test_account(AccountKind::Asset, false);
        assert_eq!(cash.section_amount(dec!(1000), dec!(250)), dec!(750));

        let payable = create_test_account(AccountKind::Liability, false);
        assert_eq!(payable.section_amount(dec!(100), dec!(400)), dec!(300));
    }

    #[test]
    fn test_sales_returns_reduce_revenue() {
        let returns = create_test_account(AccountKind::Revenue, true);
        assert_eq!(returns.section_amount(dec!(80), dec!(0)), dec!(-80));
    }

    // ==================== Validation & Serde Tests ====================

    #[test]
    fn test_new_account_requires_code() {
        let account = NewAccount {
            id: None,
            code: "  ".to_string(),
            name: "Kas".to_string(),
            kind: AccountKind::Asset,
            is_contra: false,
            is_active: true,
        };
        assert!(account.validate().is_err());
    }

    #[test]
    fn test_new_account_defaults_from_json() {
        let account: NewAccount =
            serde_json::from_str(r#"{"code":"1.1.01","name":"Kas","kind":"asset"}"#).unwrap();
        assert!(!account.is_contra);
        assert!(account.is_active);
        assert!(account.validate().is_ok());
    }

    #[test]
    fn test_kind_parses_case_insensitively() {
        assert_eq!("Revenue".parse::<AccountKind>().unwrap(), AccountKind::Revenue);
        assert!("income".parse::<AccountKind>().is_err());
    }
}

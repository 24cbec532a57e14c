//! Property-based tests for guarded balance mutation.

use chrono::Utc;
use proptest::prelude::*;
use remit_shared::Money;
use remit_shared::types::{AccountId, UserId};
use rust_decimal::Decimal;

use super::account::Account;
use super::error::LedgerError;

fn cents() -> impl Strategy<Value = i64> {
    1i64..10_000_000_000i64
}

fn money(cents: i64) -> Money {
    Money::new(Decimal::new(cents, 2)).unwrap()
}

fn account(cents: i64) -> Account {
    Account::new(AccountId::new(1), UserId::new(1), "0123456789", money(cents), Utc::now())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// A covered withdrawal subtracts exactly.
    #[test]
    fn prop_withdraw_is_exact(balance in cents(), amount in cents()) {
        prop_assume!(amount <= balance);
        let account = account(balance);
        account.withdraw(money(amount)).unwrap();
        prop_assert_eq!(account.balance(), money(balance - amount));
        prop_assert_eq!(account.balance().amount().scale(), 2);
    }

    /// A deposit adds exactly.
    #[test]
    fn prop_deposit_is_exact(balance in 0i64..10_000_000_000i64, amount in cents()) {
        let account = account(balance);
        account.deposit(money(amount)).unwrap();
        prop_assert_eq!(account.balance(), money(balance + amount));
    }

    /// An uncovered withdrawal never touches the balance.
    #[test]
    fn prop_overdraw_leaves_balance(balance in 0i64..1_000_000i64, excess in cents()) {
        let account = account(balance);
        let result = account.withdraw(money(balance + excess));
        let is_insufficient = matches!(result, Err(LedgerError::InsufficientFunds { .. }));
        prop_assert!(is_insufficient);
        prop_assert_eq!(account.balance(), money(balance));
    }
}

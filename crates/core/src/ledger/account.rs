//! Accounts and guarded balance mutation.
//!
//! An [`Account`] is the only place a balance changes. Every read-modify-write
//! runs under the account's own mutex, so concurrent deposits and withdrawals
//! against the same in-memory instance cannot interleave.
//!
//! The guard is process-local. Two processes holding separate copies of the
//! same account row are not serialized here; that has to come from the store's
//! row-level isolation.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use remit_shared::Money;
use remit_shared::types::{AccountId, UserId};

use super::error::LedgerError;

#[derive(Debug, Clone, Copy)]
struct BalanceState {
    amount: Money,
    updated_at: DateTime<Utc>,
}

/// One customer's balance.
///
/// The balance itself is private. It is read through [`Account::balance`] and
/// changed only by [`Account::deposit`] and [`Account::withdraw`].
pub struct Account {
    /// Store-assigned identifier.
    pub id: AccountId,
    /// Owning user.
    pub user_id: UserId,
    /// Externally addressable, unique account number.
    pub account_number: String,
    state: Mutex<BalanceState>,
}

impl Account {
    /// Rebuilds an account from stored state.
    #[must_use]
    pub fn new(
        id: AccountId,
        user_id: UserId,
        account_number: impl Into<String>,
        balance: Money,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            account_number: account_number.into(),
            state: Mutex::new(BalanceState {
                amount: balance,
                updated_at,
            }),
        }
    }

    /// Current balance.
    pub fn balance(&self) -> Money {
        self.lock().amount
    }

    /// Time of the last balance change.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.lock().updated_at
    }

    /// True iff the current balance is less than `amount`.
    pub fn is_insufficient_balance(&self, amount: Money) -> bool {
        self.lock().amount < amount
    }

    /// Adds `amount` to the balance and returns the new balance.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::InvalidAmount`] if `amount` is not strictly positive.
    /// - [`LedgerError::Arithmetic`] if the sum overflows.
    pub fn deposit(&self, amount: Money) -> Result<Money, LedgerError> {
        if !amount.is_positive() {
            return Err(LedgerError::InvalidAmount(amount));
        }

        let mut state = self.lock();
        let balance = state.amount.add_exact(amount, Money::SCALE)?;
        state.amount = balance;
        state.updated_at = Utc::now();
        Ok(balance)
    }

    /// Subtracts `amount` from the balance and returns the new balance.
    ///
    /// The sufficiency check and the subtraction happen under the same lock,
    /// so a withdrawal never drives the balance negative.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::InvalidAmount`] if `amount` is not strictly positive.
    /// - [`LedgerError::InsufficientFunds`] if the balance is below `amount`.
    pub fn withdraw(&self, amount: Money) -> Result<Money, LedgerError> {
        if !amount.is_positive() {
            return Err(LedgerError::InvalidAmount(amount));
        }

        let mut state = self.lock();
        if state.amount < amount {
            return Err(LedgerError::InsufficientFunds {
                balance: state.amount,
                requested: amount,
            });
        }
        let balance = state.amount.sub_exact(amount, Money::SCALE)?;
        state.amount = balance;
        state.updated_at = Utc::now();
        Ok(balance)
    }

    // Every critical section leaves the state consistent, so a poisoned lock
    // still holds a valid balance.
    fn lock(&self) -> MutexGuard<'_, BalanceState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Clone for Account {
    fn clone(&self) -> Self {
        let state = *self.lock();
        Self {
            id: self.id,
            user_id: self.user_id,
            account_number: self.account_number.clone(),
            state: Mutex::new(state),
        }
    }
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = *self.lock();
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("user_id", &self.user_id)
            .field("account_number", &self.account_number)
            .field("balance", &state.amount)
            .field("updated_at", &state.updated_at)
            .finish()
    }
}

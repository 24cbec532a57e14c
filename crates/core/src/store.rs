//! Persistence contracts the transfer orchestrator depends on.
//!
//! The core never talks to a database directly. Implementations live in the
//! `remit-db` crate; tests use in-memory fakes.

use async_trait::async_trait;
use remit_shared::Money;
use thiserror::Error;

use crate::ledger::{Account, NewTransaction, Transaction, User};

/// Errors surfaced by store implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    /// A guarded write found the row changed since it was read.
    #[error("Concurrent modification: {0}")]
    Conflict(String),

    /// Any other storage failure.
    #[error("Database error: {0}")]
    Database(String),
}

/// Read and append access to recorded transfers.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Finds the transfer recorded under a caller payment reference.
    ///
    /// Returns `Ok(None)` when nothing has been recorded.
    async fn find_by_payment_reference(
        &self,
        payment_reference: &str,
    ) -> Result<Option<Transaction>, StoreError>;

    /// Appends a transfer record.
    ///
    /// Must return [`StoreError::UniqueViolation`] when the payment reference
    /// is already present.
    async fn save_transaction(&self, transaction: NewTransaction)
    -> Result<Transaction, StoreError>;
}

/// Account lookup and balance persistence.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Finds an account by its account number.
    async fn get_account_by_account_number(
        &self,
        account_number: &str,
    ) -> Result<Option<Account>, StoreError>;

    /// Persists the account's current balance, provided the stored balance
    /// still equals `previous_balance`.
    ///
    /// Must return [`StoreError::Conflict`] when the stored balance differs
    /// or the account no longer exists.
    async fn update_account(
        &self,
        account: &Account,
        previous_balance: Money,
    ) -> Result<(), StoreError>;
}

/// Joint user and account lookup.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Finds an account and its owning user by account number.
    ///
    /// Returns `Ok(None)` when either is missing.
    async fn get_user_and_account_by_account_number(
        &self,
        account_number: &str,
    ) -> Result<Option<(User, Account)>, StoreError>;
}

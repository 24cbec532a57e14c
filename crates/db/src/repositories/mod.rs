//! Repository implementations for data access.
//!
//! Each repository exposes `SeaORM`-level methods returning [`DbErr`] and
//! implements the matching `remit-core` store trait on top of them.

pub mod account;
pub mod transaction;
pub mod user;

pub use account::AccountRepository;
pub use transaction::TransactionRepository;
pub use user::UserRepository;

use chrono::Utc;
use remit_core::ledger::{Account, User};
use remit_core::store::StoreError;
use remit_shared::Money;
use remit_shared::types::{AccountId, UserId};
use sea_orm::{DbErr, SqlErr};

use crate::entities::{accounts, users};

/// Maps a database error onto the core store error, keeping uniqueness
/// violations and failed guarded updates distinct.
pub(crate) fn store_error(e: &DbErr) -> StoreError {
    if matches!(e, DbErr::RecordNotUpdated) {
        return StoreError::Conflict(e.to_string());
    }
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => StoreError::UniqueViolation(detail),
        _ => StoreError::Database(e.to_string()),
    }
}

pub(crate) fn to_money(value: rust_decimal::Decimal, column: &str) -> Result<Money, StoreError> {
    Money::new(value).map_err(|e| StoreError::Database(format!("invalid {column}: {e}")))
}

pub(crate) fn to_account(model: accounts::Model) -> Result<Account, StoreError> {
    Ok(Account::new(
        AccountId::new(model.id),
        UserId::new(model.user_id),
        model.account_number,
        to_money(model.balance, "balance")?,
        model.updated_at.with_timezone(&Utc),
    ))
}

pub(crate) fn to_user(model: users::Model) -> User {
    User {
        id: UserId::new(model.id),
        username: model.username,
        transaction_pin: model.transaction_pin,
    }
}

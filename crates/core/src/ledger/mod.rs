//! Account ledger.
//!
//! This module implements:
//! - Guarded balance mutation on [`Account`]
//! - Account holders and recorded transfers
//! - Error types for ledger operations

pub mod account;
pub mod error;
pub mod types;

#[cfg(test)]
mod account_props;

pub use account::Account;
pub use error::LedgerError;
pub use types::{NewTransaction, Transaction, TransactionType, User};

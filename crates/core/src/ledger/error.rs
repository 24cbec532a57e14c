//! Ledger error types for balance mutation.

use remit_shared::{Money, MoneyError};
use thiserror::Error;

/// Errors that can occur while mutating an account balance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Deposits and withdrawals must be strictly positive.
    #[error("Amount must be positive, got {0}")]
    InvalidAmount(Money),

    /// The withdrawal would drive the balance below zero.
    #[error("Insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// Balance at the time of the attempt.
        balance: Money,
        /// Amount requested.
        requested: Money,
    },

    /// Exact arithmetic failed.
    #[error("Arithmetic error: {0}")]
    Arithmetic(#[from] MoneyError),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            Self::Arithmetic(_) => "ARITHMETIC_ERROR",
        }
    }
}

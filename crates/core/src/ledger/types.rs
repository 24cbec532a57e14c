//! Ledger domain types: account holders and recorded transfers.

use chrono::{DateTime, Utc};
use remit_shared::Money;
use remit_shared::types::{AccountId, TransactionId, UserId};
use serde::{Deserialize, Serialize};

/// Direction of a transfer relative to the local account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money leaves the account.
    Debit,
    /// Money enters the account.
    Credit,
}

impl TransactionType {
    /// Wire and storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debit => "debit",
            Self::Credit => "credit",
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "debit" => Ok(Self::Debit),
            "credit" => Ok(Self::Credit),
            _ => Err(format!("Unknown transaction type: {s}")),
        }
    }
}

/// The authorization identity behind an account. Read-only to the core.
#[derive(Clone)]
pub struct User {
    /// Store-assigned identifier.
    pub id: UserId,
    /// Unique login name.
    pub username: String,
    /// Fixed-length transaction PIN.
    pub transaction_pin: String,
}

impl User {
    /// Exact comparison against the PIN on file.
    #[must_use]
    pub fn pin_matches(&self, candidate: &str) -> bool {
        self.transaction_pin == candidate
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("transaction_pin", &"****")
            .finish()
    }
}

/// A transfer record that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    /// Account the transfer was applied to.
    pub account_id: AccountId,
    /// Caller-supplied idempotency key.
    pub payment_reference: String,
    /// Reference sent to the gateway.
    pub settlement_reference: String,
    /// Transferred amount.
    pub amount: Money,
    /// Debit or credit.
    pub transaction_type: TransactionType,
    /// Whether the gateway reported success.
    pub success: bool,
    /// When the transfer was processed.
    pub transaction_time: DateTime<Utc>,
}

/// The durable ledger record of one processed transfer.
///
/// At most one exists per payment reference. Never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Store-assigned identifier.
    pub id: TransactionId,
    /// Account the transfer was applied to.
    pub account_id: AccountId,
    /// Caller-supplied idempotency key.
    pub payment_reference: String,
    /// Reference sent to the gateway.
    pub settlement_reference: String,
    /// Transferred amount.
    pub amount: Money,
    /// Debit or credit.
    pub transaction_type: TransactionType,
    /// Whether the gateway reported success.
    pub success: bool,
    /// When the transfer was processed.
    pub transaction_time: DateTime<Utc>,
}

impl Transaction {
    /// Attaches the identifier assigned on insert.
    #[must_use]
    pub fn from_new(id: TransactionId, new: NewTransaction) -> Self {
        Self {
            id,
            account_id: new.account_id,
            payment_reference: new.payment_reference,
            settlement_reference: new.settlement_reference,
            amount: new.amount,
            transaction_type: new.transaction_type,
            success: new.success,
            transaction_time: new.transaction_time,
        }
    }
}

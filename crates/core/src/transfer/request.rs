//! Transfer request and its validated form.

use remit_shared::Money;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::ledger::TransactionType;

/// Inbound transfer instruction, exactly as the caller sent it.
///
/// Every field is optional so that missing values surface as field-level
/// validation errors rather than decode failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TransferRequest {
    /// Ten-digit account number.
    pub account_number: Option<String>,
    /// Account holder's username.
    pub username: Option<String>,
    /// Four-character transaction PIN.
    pub transaction_pin: Option<String>,
    /// Caller-supplied idempotency key.
    pub payment_reference: Option<String>,
    /// Amount to move.
    pub amount: Option<Decimal>,
    /// `"debit"` or `"credit"`.
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
}

/// A transfer request that passed structural validation.
#[derive(Clone, PartialEq, Eq)]
pub struct ValidatedTransfer {
    /// Ten-digit account number.
    pub account_number: String,
    /// Account holder's username.
    pub username: String,
    /// Four-character transaction PIN.
    pub transaction_pin: String,
    /// Caller-supplied idempotency key.
    pub payment_reference: String,
    /// Strictly positive amount at scale 2.
    pub amount: Money,
    /// Debit or credit.
    pub transaction_type: TransactionType,
}

impl std::fmt::Debug for ValidatedTransfer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatedTransfer")
            .field("account_number", &self.account_number)
            .field("username", &self.username)
            .field("transaction_pin", &"****")
            .field("payment_reference", &self.payment_reference)
            .field("amount", &self.amount)
            .field("transaction_type", &self.transaction_type)
            .finish()
    }
}

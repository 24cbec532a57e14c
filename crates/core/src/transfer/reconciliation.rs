//! Reporting of settlements that were not fully recorded locally.
//!
//! Once the gateway has settled, a later ledger or persistence failure leaves
//! money moved externally with no matching local state. The orchestrator does
//! not retry or reverse; it hands the incident to a [`ReconciliationHook`].

use async_trait::async_trait;
use remit_shared::Money;
use remit_shared::types::AccountId;

use crate::ledger::TransactionType;

/// The step that failed after settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailedStage {
    /// Deposit or withdraw was rejected.
    LedgerMutation,
    /// Writing the new balance failed.
    AccountUpdate,
    /// Inserting the transaction record failed.
    TransactionInsert,
}

impl FailedStage {
    /// Stable name for logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LedgerMutation => "ledger_mutation",
            Self::AccountUpdate => "account_update",
            Self::TransactionInsert => "transaction_insert",
        }
    }
}

impl std::fmt::Display for FailedStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A gateway settlement with no complete local record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnrecordedSettlement {
    /// Account the transfer targeted.
    pub account_id: AccountId,
    /// Caller's idempotency key.
    pub payment_reference: String,
    /// Reference the gateway settled under.
    pub settlement_reference: String,
    /// Settled amount.
    pub amount: Money,
    /// Debit or credit.
    pub transaction_type: TransactionType,
    /// Where the flow stopped.
    pub stage: FailedStage,
    /// Underlying error text.
    pub error: String,
}

/// Receives unrecorded settlements for out-of-band resolution.
#[async_trait]
pub trait ReconciliationHook: Send + Sync {
    /// Called once per incident. Must not fail the request further.
    async fn unrecorded_settlement(&self, incident: UnrecordedSettlement);
}

/// Default hook: a structured error event for operators.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingReconciliation;

#[async_trait]
impl ReconciliationHook for LoggingReconciliation {
    async fn unrecorded_settlement(&self, incident: UnrecordedSettlement) {
        tracing::error!(
            account_id = %incident.account_id,
            payment_reference = %incident.payment_reference,
            settlement_reference = %incident.settlement_reference,
            amount = %incident.amount,
            transaction_type = %incident.transaction_type,
            stage = %incident.stage,
            error = %incident.error,
            "Settlement not recorded locally, manual reconciliation required"
        );
    }
}

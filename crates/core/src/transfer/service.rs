//! Transfer orchestration.
//!
//! [`TransferService::transfer`] runs, in order and stopping at the first
//! failure:
//!
//! 1. Structural validation
//! 2. Idempotency check on the payment reference
//! 3. Joint user and account lookup
//! 4. PIN authorization
//! 5. Funds sufficiency (debits only)
//! 6. Gateway submission under a fresh settlement reference
//! 7. Ledger mutation
//! 8. Account update, then transaction insert
//! 9. Receipt assembly
//!
//! Steps 2 to 8 run while holding the account number's [`AccountLocks`]
//! guard, so transfers against one account never interleave inside a
//! process. The account update is conditional on the balance read in step 3,
//! which rejects writes that raced with another process.
//!
//! Failures from step 7 onward happen after the gateway has settled and are
//! reported to the [`ReconciliationHook`].

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, error, info};
use uuid::Uuid;

use remit_shared::Money;

use super::error::TransferError;
use super::locks::AccountLocks;
use super::reconciliation::{
    FailedStage, LoggingReconciliation, ReconciliationHook, UnrecordedSettlement,
};
use super::request::{TransferRequest, ValidatedTransfer};
use crate::gateway::{GatewayError, GatewayReceipt, PaymentGateway};
use crate::ledger::{Account, NewTransaction, TransactionType};
use crate::store::{AccountStore, StoreError, TransactionStore, UserStore};
use crate::validation::Validator;

/// Data returned for a successful transfer or status query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferReceipt {
    /// Account id echoed by the gateway.
    pub account_id: String,
    /// Settlement reference echoed by the gateway.
    pub reference: String,
    /// Amount echoed by the gateway.
    pub amount: Money,
    /// The caller's payment reference.
    pub payment_reference: String,
}

impl TransferReceipt {
    fn from_gateway(receipt: GatewayReceipt, payment_reference: String) -> Self {
        Self {
            account_id: receipt.data.account_id,
            reference: receipt.data.reference,
            amount: receipt.data.amount,
            payment_reference,
        }
    }
}

/// The persistence collaborators.
#[derive(Clone)]
pub struct Stores {
    /// Recorded transfers.
    pub transactions: Arc<dyn TransactionStore>,
    /// Accounts.
    pub accounts: Arc<dyn AccountStore>,
    /// Users joined with accounts.
    pub users: Arc<dyn UserStore>,
}

/// Coordinates a transfer across validation, the gateway and the ledger.
#[derive(Clone)]
pub struct TransferService {
    validator: Validator,
    stores: Stores,
    gateway: Arc<dyn PaymentGateway>,
    reconciliation: Arc<dyn ReconciliationHook>,
    locks: Arc<AccountLocks>,
}

impl TransferService {
    /// Creates a service that logs unrecorded settlements.
    #[must_use]
    pub fn new(validator: Validator, stores: Stores, gateway: Arc<dyn PaymentGateway>) -> Self {
        Self {
            validator,
            stores,
            gateway,
            reconciliation: Arc::new(LoggingReconciliation),
            locks: Arc::new(AccountLocks::new()),
        }
    }

    /// Replaces the reconciliation hook.
    #[must_use]
    pub fn with_reconciliation(mut self, hook: Arc<dyn ReconciliationHook>) -> Self {
        self.reconciliation = hook;
        self
    }

    /// Processes one transfer request.
    pub async fn transfer(&self, request: TransferRequest) -> Result<TransferReceipt, TransferError> {
        let transfer = self
            .validator
            .validate(&request)
            .map_err(TransferError::Validation)?;

        let _guard = self.locks.acquire(&transfer.account_number).await;

        self.ensure_unprocessed(&transfer.payment_reference).await?;

        let Some((user, account)) = self
            .stores
            .users
            .get_user_and_account_by_account_number(&transfer.account_number)
            .await
            .map_err(|e| lookup_failed(&e, "user and account"))?
        else {
            info!(account_number = %transfer.account_number, "Transfer rejected: user or account not found");
            return Err(TransferError::UserOrAccountNotFound);
        };

        if !user.pin_matches(&transfer.transaction_pin) {
            info!(account_id = %account.id, "Transfer rejected: incorrect transaction PIN");
            return Err(TransferError::IncorrectPin);
        }

        if transfer.transaction_type == TransactionType::Debit
            && account.is_insufficient_balance(transfer.amount)
        {
            info!(
                account_id = %account.id,
                amount = %transfer.amount,
                "Transfer rejected: insufficient funds"
            );
            return Err(TransferError::InsufficientFunds);
        }

        let settlement_reference = Uuid::new_v4().to_string();
        let receipt = self
            .gateway
            .submit(account.id, transfer.amount, &settlement_reference)
            .await
            .map_err(|e| submission_failed(e, &settlement_reference))?;

        self.record(&transfer, &account, &settlement_reference, receipt.is_success())
            .await?;

        info!(
            account_id = %account.id,
            payment_reference = %transfer.payment_reference,
            settlement_reference = %settlement_reference,
            transaction_type = %transfer.transaction_type,
            amount = %transfer.amount,
            "Transfer completed"
        );

        Ok(TransferReceipt::from_gateway(receipt, transfer.payment_reference))
    }

    /// Reconciles a recorded transfer against the gateway's current view.
    pub async fn status_query(&self, payment_reference: &str) -> Result<TransferReceipt, TransferError> {
        let Some(transaction) = self
            .stores
            .transactions
            .find_by_payment_reference(payment_reference)
            .await
            .map_err(|e| lookup_failed(&e, "transaction"))?
        else {
            info!(payment_reference, "Status query: transaction not found");
            return Err(TransferError::TransactionNotFound);
        };

        let receipt = self
            .gateway
            .query(&transaction.settlement_reference)
            .await
            .map_err(|e| match e {
                GatewayError::Decode(detail) => {
                    error!(error = %detail, "Gateway status response could not be decoded");
                    TransferError::GatewayDecode(detail)
                }
                other => {
                    error!(
                        error = %other,
                        settlement_reference = %transaction.settlement_reference,
                        "Gateway status query failed"
                    );
                    TransferError::GatewayUnavailable(other)
                }
            })?;

        debug!(
            payment_reference,
            settlement_reference = %transaction.settlement_reference,
            status = receipt.status,
            "Status query answered"
        );

        Ok(TransferReceipt::from_gateway(receipt, transaction.payment_reference))
    }

    async fn ensure_unprocessed(&self, payment_reference: &str) -> Result<(), TransferError> {
        let existing = self
            .stores
            .transactions
            .find_by_payment_reference(payment_reference)
            .await
            .map_err(|e| lookup_failed(&e, "transaction"))?;

        if existing.is_some() {
            info!(payment_reference, "Transfer rejected: duplicate payment reference");
            return Err(TransferError::DuplicateReference);
        }
        Ok(())
    }

    /// Steps 7 and 8. Every failure here follows a settlement.
    async fn record(
        &self,
        transfer: &ValidatedTransfer,
        account: &Account,
        settlement_reference: &str,
        success: bool,
    ) -> Result<(), TransferError> {
        let previous_balance = account.balance();
        let mutation = match transfer.transaction_type {
            TransactionType::Credit => account.deposit(transfer.amount),
            TransactionType::Debit => account.withdraw(transfer.amount),
        };
        if let Err(e) = mutation {
            self.report(transfer, account, settlement_reference, FailedStage::LedgerMutation, e.to_string())
                .await;
            return Err(TransferError::Processing(e));
        }

        if let Err(e) = self
            .stores
            .accounts
            .update_account(account, previous_balance)
            .await
        {
            self.report(transfer, account, settlement_reference, FailedStage::AccountUpdate, e.to_string())
                .await;
            return Err(TransferError::Persistence(e));
        }

        let record = NewTransaction {
            account_id: account.id,
            payment_reference: transfer.payment_reference.clone(),
            settlement_reference: settlement_reference.to_string(),
            amount: transfer.amount,
            transaction_type: transfer.transaction_type,
            success,
            transaction_time: Utc::now(),
        };

        match self.stores.transactions.save_transaction(record).await {
            Ok(_) => Ok(()),
            Err(e) => {
                self.report(transfer, account, settlement_reference, FailedStage::TransactionInsert, e.to_string())
                    .await;
                match e {
                    StoreError::UniqueViolation(_) => Err(TransferError::DuplicateReference),
                    other => Err(TransferError::Persistence(other)),
                }
            }
        }
    }

    async fn report(
        &self,
        transfer: &ValidatedTransfer,
        account: &Account,
        settlement_reference: &str,
        stage: FailedStage,
        error: String,
    ) {
        self.reconciliation
            .unrecorded_settlement(UnrecordedSettlement {
                account_id: account.id,
                payment_reference: transfer.payment_reference.clone(),
                settlement_reference: settlement_reference.to_string(),
                amount: transfer.amount,
                transaction_type: transfer.transaction_type,
                stage,
                error,
            })
            .await;
    }
}

fn lookup_failed(e: &StoreError, what: &str) -> TransferError {
    error!(error = %e, "Failed to look up {what}");
    TransferError::Store(e.clone())
}

fn submission_failed(e: GatewayError, settlement_reference: &str) -> TransferError {
    error!(error = %e, settlement_reference, "Gateway submission failed");
    match e {
        GatewayError::Rejected { status } => TransferError::Gateway { status },
        GatewayError::Decode(detail) => TransferError::GatewayDecode(detail),
        transport => TransferError::GatewayUnavailable(transport),
    }
}

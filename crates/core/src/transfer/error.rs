//! Transfer outcome taxonomy.
//!
//! Business outcomes (duplicate, not found, wrong PIN, insufficient funds)
//! are ordinary results reported with `success = false`. Gateway and store
//! failures are infrastructure errors reported as server errors.

use thiserror::Error;

use super::messages;
use crate::gateway::GatewayError;
use crate::ledger::LedgerError;
use crate::store::StoreError;
use crate::validation::FieldErrors;

/// Errors returned by [`TransferService`](super::TransferService).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    /// One or more fields failed structural validation.
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// The payment reference has already been processed.
    #[error("Payment reference already processed")]
    DuplicateReference,

    /// The account number did not resolve to both a user and an account.
    #[error("User or account not found")]
    UserOrAccountNotFound,

    /// The submitted PIN does not match.
    #[error("Incorrect transaction PIN")]
    IncorrectPin,

    /// A debit exceeds the current balance.
    #[error("Insufficient funds")]
    InsufficientFunds,

    /// No transfer is recorded under the reference.
    #[error("Transaction not found")]
    TransactionNotFound,

    /// The gateway could not be reached or timed out.
    #[error("Gateway unavailable: {0}")]
    GatewayUnavailable(GatewayError),

    /// The gateway answered with a non-success status.
    #[error("Gateway returned status {status}")]
    Gateway {
        /// Returned HTTP status.
        status: u16,
    },

    /// The gateway's success body could not be decoded.
    #[error("Gateway response could not be decoded: {0}")]
    GatewayDecode(String),

    /// The ledger mutation failed after settlement.
    #[error("Ledger mutation failed: {0}")]
    Processing(LedgerError),

    /// Persisting the account or the transaction failed after settlement.
    #[error("Persistence failed: {0}")]
    Persistence(StoreError),

    /// A lookup failed before anything was settled.
    #[error("Store lookup failed: {0}")]
    Store(StoreError),
}

impl TransferError {
    /// The caller-facing message.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::Validation(_) => messages::BAD_REQUEST,
            Self::DuplicateReference => messages::NOT_UNIQUE_REFERENCE,
            Self::UserOrAccountNotFound => messages::USER_OR_ACCOUNT_NOT_FOUND,
            Self::IncorrectPin => messages::INCORRECT_TRANSACTION_PIN,
            Self::InsufficientFunds => messages::INSUFFICIENT_FUNDS,
            Self::TransactionNotFound => messages::TRANSACTION_NOT_FOUND,
            Self::GatewayUnavailable(_) | Self::Gateway { .. } => {
                messages::UNABLE_TO_COMPLETE_TRANSACTION
            }
            Self::GatewayDecode(_) | Self::Processing(_) | Self::Persistence(_) | Self::Store(_) => {
                messages::APPLICATION_ERROR
            }
        }
    }

    /// Returns the error code for logs and API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::DuplicateReference => "DUPLICATE_REFERENCE",
            Self::UserOrAccountNotFound => "USER_OR_ACCOUNT_NOT_FOUND",
            Self::IncorrectPin => "INCORRECT_PIN",
            Self::InsufficientFunds => "INSUFFICIENT_FUNDS",
            Self::TransactionNotFound => "TRANSACTION_NOT_FOUND",
            Self::GatewayUnavailable(_) => "GATEWAY_UNAVAILABLE",
            Self::Gateway { .. } => "GATEWAY_ERROR",
            Self::GatewayDecode(_) => "GATEWAY_DECODE_ERROR",
            Self::Processing(_) => "PROCESSING_ERROR",
            Self::Persistence(_) => "PERSISTENCE_ERROR",
            Self::Store(_) => "STORE_ERROR",
        }
    }

    /// Returns the HTTP status code for this outcome.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::DuplicateReference
            | Self::UserOrAccountNotFound
            | Self::IncorrectPin
            | Self::InsufficientFunds
            | Self::TransactionNotFound => 200,
            Self::GatewayUnavailable(_) => 503,
            Self::Gateway { .. } => 502,
            Self::GatewayDecode(_) | Self::Processing(_) | Self::Persistence(_) | Self::Store(_) => {
                500
            }
        }
    }

    /// True for rejections that are normal business results, not faults.
    #[must_use]
    pub fn is_business_outcome(&self) -> bool {
        matches!(
            self,
            Self::DuplicateReference
                | Self::UserOrAccountNotFound
                | Self::IncorrectPin
                | Self::InsufficientFunds
                | Self::TransactionNotFound
        )
    }

    /// Field errors, for validation failures.
    #[must_use]
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(TransferError::Validation(FieldErrors::default()), 400, "bad request")]
    #[case(TransferError::DuplicateReference, 200, "transaction reference is not unique")]
    #[case(TransferError::UserOrAccountNotFound, 200, "user or account not found")]
    #[case(TransferError::IncorrectPin, 200, "incorrect user transaction PIN")]
    #[case(TransferError::InsufficientFunds, 200, "insufficient funds")]
    #[case(TransferError::TransactionNotFound, 200, "transaction not found")]
    #[case(
        TransferError::GatewayUnavailable(GatewayError::Timeout("read".into())),
        503,
        "unable to complete transaction"
    )]
    #[case(TransferError::Gateway { status: 500 }, 502, "unable to complete transaction")]
    #[case(TransferError::GatewayDecode("eof".into()), 500, "an application error occurred")]
    #[case(
        TransferError::Persistence(StoreError::Database("down".into())),
        500,
        "an application error occurred"
    )]
    #[case(
        TransferError::Store(StoreError::Database("down".into())),
        500,
        "an application error occurred"
    )]
    fn test_status_and_message(
        #[case] error: TransferError,
        #[case] status: u16,
        #[case] message: &str,
    ) {
        assert_eq!(error.http_status_code(), status);
        assert_eq!(error.message(), message);
    }

    #[test]
    fn test_business_outcomes() {
        assert!(TransferError::InsufficientFunds.is_business_outcome());
        assert!(TransferError::TransactionNotFound.is_business_outcome());
        assert!(!TransferError::Validation(FieldErrors::default()).is_business_outcome());
        assert!(!TransferError::Gateway { status: 400 }.is_business_outcome());
    }

    #[test]
    fn test_field_errors_only_for_validation() {
        let mut errors = FieldErrors::default();
        errors.add("amount", "amount is a required field".to_string());
        let err = TransferError::Validation(errors);
        assert_eq!(
            err.field_errors().and_then(|e| e.get("amount")),
            Some("amount is a required field")
        );
        assert!(TransferError::IncorrectPin.field_errors().is_none());
    }
}

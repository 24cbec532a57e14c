//! Fund transfers and status queries.

pub mod error;
pub mod locks;
pub mod messages;
pub mod reconciliation;
pub mod request;
pub mod service;


pub use error::TransferError;
pub use locks::AccountLocks;
pub use reconciliation::{FailedStage, LoggingReconciliation, ReconciliationHook, UnrecordedSettlement};
pub use request::{TransferRequest, ValidatedTransfer};
pub use service::{Stores, TransferReceipt, TransferService};

//! Core business logic for Remit.
//!
//! This crate contains the transfer orchestrator and the account ledger with
//! ZERO web or database dependencies. Persistence and the settlement gateway
//! are reached only through the traits in [`store`] and [`gateway`].
//!
//! # Modules
//!
//! - `ledger` - Accounts, guarded balance mutation, recorded transfers
//! - `validation` - Explicit request validator
//! - `gateway` - Settlement gateway contract
//! - `store` - Persistence contracts
//! - `transfer` - Orchestration, outcome taxonomy, reconciliation hook

pub mod gateway;
pub mod ledger;
pub mod store;
pub mod transfer;
pub mod validation;

pub use gateway::{GatewayError, GatewayReceipt, PaymentGateway, SettlementData};
pub use store::{AccountStore, StoreError, TransactionStore, UserStore};
pub use transfer::{TransferError, TransferReceipt, TransferRequest, TransferService};
pub use validation::{FieldErrors, Rule, Validator};

//! Shared types and configuration for Remit.
//!
//! This crate provides common types used across all other crates:
//! - Money with a fixed two-digit scale
//! - Typed IDs for store-assigned entity references
//! - Configuration management

pub mod config;
pub mod types;

pub use config::AppConfig;
pub use types::{Money, MoneyError};

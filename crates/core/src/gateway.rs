//! Contract for the external settlement service.
//!
//! The orchestrator only sees [`PaymentGateway`]. The HTTP implementation
//! lives in the `remit-gateway` crate.

use async_trait::async_trait;
use remit_shared::Money;
use remit_shared::types::AccountId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fields the gateway echoes back for a submitted or queried payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementData {
    /// Account identifier as the gateway knows it.
    pub account_id: String,
    /// Settled amount.
    pub amount: Money,
    /// Settlement reference.
    pub reference: String,
}

/// A successful (2xx) gateway response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayReceipt {
    /// HTTP status returned by the gateway.
    pub status: u16,
    /// Decoded body.
    pub data: SettlementData,
}

impl GatewayReceipt {
    /// Whether the gateway reported success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Gateway failures. Transport problems are kept apart from non-success
/// statuses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The configured read timeout elapsed.
    #[error("Gateway timed out: {0}")]
    Timeout(String),

    /// The request could not be sent or the response could not be read.
    #[error("Gateway transport error: {0}")]
    Transport(String),

    /// The gateway answered with a non-2xx status.
    #[error("Gateway rejected the request with status {status}")]
    Rejected {
        /// Returned HTTP status.
        status: u16,
    },

    /// A 2xx body did not match the expected shape.
    #[error("Gateway response could not be decoded: {0}")]
    Decode(String),
}

impl GatewayError {
    /// True for failures where the gateway could not be reached.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::Transport(_))
    }
}

/// The external settlement service.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Submits a payment for settlement.
    async fn submit(
        &self,
        account_id: AccountId,
        amount: Money,
        settlement_reference: &str,
    ) -> Result<GatewayReceipt, GatewayError>;

    /// Fetches the gateway's current view of a payment.
    async fn query(&self, settlement_reference: &str) -> Result<GatewayReceipt, GatewayError>;
}

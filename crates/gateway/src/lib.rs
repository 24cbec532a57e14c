//! HTTP client for the external settlement gateway.
//!
//! Implements [`PaymentGateway`] over JSON:
//! - `POST {base}/api/v1/third-party/payments` submits a payment
//! - `GET {base}/api/v1/third-party/payments/{reference}/get` queries one
//!
//! A single `reqwest::Client` carries the configured read timeout. There are
//! no retries.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use tracing::debug;

use remit_core::gateway::{GatewayError, GatewayReceipt, PaymentGateway, SettlementData};
use remit_shared::Money;
use remit_shared::config::GatewayConfig;
use remit_shared::types::AccountId;

const PAYMENTS_PATH: &str = "/api/v1/third-party/payments";

#[derive(Debug, Serialize)]
struct SubmitPayment<'a> {
    account_id: String,
    amount: Money,
    reference: &'a str,
}

/// reqwest-backed [`PaymentGateway`].
#[derive(Debug, Clone)]
pub struct HttpPaymentGateway {
    client: Client,
    base_url: String,
}

impl HttpPaymentGateway {
    /// Builds a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] if the HTTP client cannot be
    /// initialised.
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(Duration::from_secs(config.read_timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| {
                GatewayError::Transport(format!("failed to initialize HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn payments_url(&self) -> String {
        format!("{}{PAYMENTS_PATH}", self.base_url)
    }

    fn payment_url(&self, settlement_reference: &str) -> String {
        format!("{}{PAYMENTS_PATH}/{settlement_reference}/get", self.base_url)
    }

    async fn exchange(&self, request: RequestBuilder) -> Result<GatewayReceipt, GatewayError> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        debug!(status = status.as_u16(), body = %body, "Gateway response");

        if !status.is_success() {
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
            });
        }

        let data: SettlementData =
            serde_json::from_str(&body).map_err(|e| GatewayError::Decode(e.to_string()))?;

        Ok(GatewayReceipt {
            status: status.as_u16(),
            data,
        })
    }
}

fn transport_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout(e.to_string())
    } else {
        GatewayError::Transport(e.to_string())
    }
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    async fn submit(
        &self,
        account_id: AccountId,
        amount: Money,
        settlement_reference: &str,
    ) -> Result<GatewayReceipt, GatewayError> {
        let payload = SubmitPayment {
            account_id: account_id.to_string(),
            amount,
            reference: settlement_reference,
        };
        let url = self.payments_url();
        debug!(url = %url, account_id = %payload.account_id, amount = %amount, reference = settlement_reference, "Gateway submit");

        self.exchange(self.client.post(url).json(&payload)).await
    }

    async fn query(&self, settlement_reference: &str) -> Result<GatewayReceipt, GatewayError> {
        let url = self.payment_url(settlement_reference);
        debug!(url = %url, "Gateway query");

        self.exchange(self.client.get(url)).await
    }
}

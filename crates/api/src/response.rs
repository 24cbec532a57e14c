//! Response envelope shared by every endpoint.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;

use remit_core::transfer::messages;
use remit_core::{FieldErrors, TransferError, TransferReceipt};

/// `{success, message, data?, errors?}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    /// Whether the operation succeeded.
    pub success: bool,
    /// One of the fixed message constants.
    pub message: &'static str,
    /// Transfer data on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<TransferReceipt>,
    /// Per-field validation messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

impl ApiResponse {
    /// Successful transfer or status query.
    #[must_use]
    pub fn success(data: TransferReceipt) -> Self {
        Self {
            success: true,
            message: messages::SUCCESSFUL_TRANSACTION,
            data: Some(data),
            errors: None,
        }
    }

    /// Failure with no payload.
    #[must_use]
    pub fn failure(message: &'static str) -> Self {
        Self {
            success: false,
            message,
            data: None,
            errors: None,
        }
    }

    /// Pairs the envelope with a status code.
    pub fn with_status(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

/// Maps a [`TransferError`] onto the envelope.
#[derive(Debug)]
pub struct ApiError(pub TransferError);

impl From<TransferError> for ApiError {
    fn from(e: TransferError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!(error = %self.0, code = self.0.error_code(), "Request failed");
        }

        let mut body = ApiResponse::failure(self.0.message());
        body.errors = self.0.field_errors().cloned();
        body.with_status(status)
    }
}

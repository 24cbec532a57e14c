//! Fund-transfer and status-query routes.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::info;

use remit_core::TransferRequest;
use remit_core::transfer::messages;

use crate::AppState;
use crate::response::{ApiError, ApiResponse};

/// Creates the bank routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/fund-transfer", post(fund_transfer))
        .route("/status-query/{reference}", get(status_query))
}

async fn fund_transfer(
    State(state): State<AppState>,
    payload: Result<Json<TransferRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            info!(error = %rejection, "Rejected malformed transfer body");
            return ApiResponse::failure(messages::INVALID_JSON_REQUEST)
                .with_status(StatusCode::BAD_REQUEST);
        }
    };

    match state.transfers.transfer(request).await {
        Ok(receipt) => ApiResponse::success(receipt).with_status(StatusCode::OK),
        Err(e) => ApiError(e).into_response(),
    }
}

async fn status_query(State(state): State<AppState>, Path(reference): Path<String>) -> Response {
    match state.transfers.status_query(&reference).await {
        Ok(receipt) => ApiResponse::success(receipt).with_status(StatusCode::OK),
        Err(e) => ApiError(e).into_response(),
    }
}

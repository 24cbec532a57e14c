//! JSON fallbacks for unknown routes and unsupported methods.

use axum::http::StatusCode;
use axum::response::Response;

use remit_core::transfer::messages;

use crate::response::ApiResponse;

/// 404 for unknown routes.
pub async fn not_found() -> Response {
    ApiResponse::failure(messages::RESOURCE_NOT_FOUND).with_status(StatusCode::NOT_FOUND)
}

/// 405 for known routes hit with the wrong method.
pub async fn method_not_allowed() -> Response {
    ApiResponse::failure(messages::METHOD_NOT_ALLOWED).with_status(StatusCode::METHOD_NOT_ALLOWED)
}

//! HttpPaymentGateway against a local stub settlement service.

use std::time::Duration;

use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use remit_core::gateway::{GatewayError, PaymentGateway};
use remit_gateway::HttpPaymentGateway;
use remit_shared::Money;
use remit_shared::config::GatewayConfig;
use remit_shared::types::AccountId;
use rust_decimal_macros::dec;
use serde_json::{Value, json};

async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn gateway(base_url: String, read_timeout_secs: u64) -> HttpPaymentGateway {
    HttpPaymentGateway::new(&GatewayConfig {
        base_url,
        read_timeout_secs,
    })
    .unwrap()
}

async fn echo_payment(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    assert_eq!(headers["content-type"], "application/json");
    assert_eq!(body["account_id"], "1");
    assert_eq!(body["amount"], "100.00");
    (
        StatusCode::OK,
        Json(json!({
            "account_id": body["account_id"],
            "amount": 100.0,
            "reference": body["reference"],
        })),
    )
}

#[tokio::test]
async fn test_submit_decodes_echoed_settlement() {
    let base = spawn_stub(Router::new().route("/api/v1/third-party/payments", post(echo_payment))).await;
    let gateway = gateway(base, 5);

    let receipt = gateway
        .submit(AccountId::new(1), Money::new(dec!(100)).unwrap(), "settle-1")
        .await
        .unwrap();

    assert_eq!(receipt.status, 200);
    assert!(receipt.is_success());
    assert_eq!(receipt.data.account_id, "1");
    assert_eq!(receipt.data.reference, "settle-1");
    assert_eq!(receipt.data.amount.amount(), dec!(100.00));
}

#[tokio::test]
async fn test_query_uses_settlement_reference_in_path() {
    let router = Router::new().route(
        "/api/v1/third-party/payments/{reference}/get",
        get(|Path(reference): Path<String>| async move {
            Json(json!({ "account_id": "7", "amount": 12.5, "reference": reference }))
        }),
    );
    let gateway = gateway(spawn_stub(router).await, 5);

    let receipt = gateway.query("settle-9").await.unwrap();

    assert_eq!(receipt.data.reference, "settle-9");
    assert_eq!(receipt.data.account_id, "7");
    assert_eq!(receipt.data.amount.to_string(), "12.50");
}

#[tokio::test]
async fn test_non_success_status_is_rejected() {
    let router = Router::new().route(
        "/api/v1/third-party/payments",
        post(|| async { (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({"error": "no"}))) }),
    );
    let gateway = gateway(spawn_stub(router).await, 5);

    let err = gateway
        .submit(AccountId::new(1), Money::new(dec!(1)).unwrap(), "settle-2")
        .await
        .unwrap_err();

    assert_eq!(err, GatewayError::Rejected { status: 422 });
}

#[tokio::test]
async fn test_undecodable_body_is_a_decode_error() {
    let router = Router::new().route(
        "/api/v1/third-party/payments/{reference}/get",
        get(|| async { "not json" }),
    );
    let gateway = gateway(spawn_stub(router).await, 5);

    let err = gateway.query("settle-3").await.unwrap_err();

    assert!(matches!(err, GatewayError::Decode(_)));
}

#[tokio::test]
async fn test_slow_gateway_times_out() {
    let router = Router::new().route(
        "/api/v1/third-party/payments",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(json!({}))
        }),
    );
    let gateway = gateway(spawn_stub(router).await, 1);

    let err = gateway
        .submit(AccountId::new(1), Money::new(dec!(1)).unwrap(), "settle-4")
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::Timeout(_)));
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_unreachable_gateway_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let gateway = gateway(format!("http://{addr}"), 1);

    let err = gateway.query("settle-5").await.unwrap_err();

    assert!(err.is_transport());
}

mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

// Amount validation happens before any provider traffic, so these run
// without network access.

#[tokio::test]
async fn payment_intent_rejects_a_zero_price() -> Result<()> {
    let token = common::bearer_token_for("pat@example.com");
    let request = common::with_bearer(
        common::json_request("POST", "/create-payment-intent", json!({ "price": 0.0 })),
        &token,
    );

    let response = common::send(request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let payload = common::body_json(response).await;
    let message = payload["message"].as_str().unwrap_or_default();
    assert!(
        message.starts_with("invalid payment amount"),
        "unexpected message: {}",
        payload
    );

    Ok(())
}

#[tokio::test]
async fn payment_intent_rejects_a_negative_price() -> Result<()> {
    let token = common::bearer_token_for("pat@example.com");
    let request = common::with_bearer(
        common::json_request("POST", "/create-payment-intent", json!({ "price": -12.5 })),
        &token,
    );

    let response = common::send(request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn payment_intent_rejects_a_non_numeric_price() -> Result<()> {
    let token = common::bearer_token_for("pat@example.com");
    let request = common::with_bearer(
        common::json_request("POST", "/create-payment-intent", json!({ "price": "ten" })),
        &token,
    );

    let response = common::send(request).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    Ok(())
}

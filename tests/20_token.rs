mod common;

use anyhow::Result;
use axum::http::StatusCode;
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde_json::json;

use techhive_api::auth::Claims;
use techhive_api::config;

#[tokio::test]
async fn jwt_endpoint_issues_a_decodable_token() -> Result<()> {
    let request = common::json_request("POST", "/jwt", json!({ "email": "pat@example.com" }));
    let response = common::send(request).await;

    assert_eq!(response.status(), StatusCode::OK, "token issuance failed");

    let payload = common::body_json(response).await;
    let token = payload["token"].as_str().unwrap_or_default();
    assert!(!token.is_empty(), "missing token field: {}", payload);

    let secret = &config::config().security.token_secret;
    let decoded = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;

    assert_eq!(decoded.claims.email, "pat@example.com");
    assert!(decoded.claims.exp > decoded.claims.iat);

    Ok(())
}

#[tokio::test]
async fn jwt_endpoint_rejects_a_body_without_an_email() -> Result<()> {
    let request = common::json_request("POST", "/jwt", json!({}));
    let response = common::send(request).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    Ok(())
}

//! Payment-intent creation against the Stripe REST API.

use once_cell::sync::Lazy;
use serde::Deserialize;
use thiserror::Error;

use crate::config;

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("invalid payment amount: {0}")]
    InvalidAmount(f64),

    #[error("payment provider rejected the request: {0}")]
    Provider(String),

    #[error("payment provider unreachable: {0}")]
    Network(String),

    #[error("unexpected payment provider response: {0}")]
    InvalidResponse(String),
}

/// Convert a major-unit price (e.g. dollars) into the provider's minor units
/// (cents), rounding to the nearest cent. Non-finite and non-positive
/// amounts are rejected before any provider call.
pub fn to_minor_units(price: f64) -> Result<i64, PaymentError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(PaymentError::InvalidAmount(price));
    }

    let cents = (price * 100.0).round();
    if cents > i64::MAX as f64 {
        return Err(PaymentError::InvalidAmount(price));
    }

    Ok(cents as i64)
}

/// Thin client for the payment provider's REST API
pub struct StripeClient {
    secret_key: String,
    base_url: String,
    http_client: reqwest::Client,
}

impl StripeClient {
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            base_url: "https://api.stripe.com".to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    pub fn from_config() -> Self {
        Self::new(config::config().payments.stripe_secret_key.as_str())
    }

    /// Process-wide client, created on first use. The connection pool is
    /// shared across requests.
    pub fn shared() -> &'static StripeClient {
        static CLIENT: Lazy<StripeClient> = Lazy::new(StripeClient::from_config);
        &CLIENT
    }

    /// Set a custom API base URL (for testing)
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Create a card payment intent and return its client secret. Amounts
    /// are minor units, currency is fixed to USD.
    pub async fn create_intent(&self, amount_minor: i64) -> Result<String, PaymentError> {
        let url = format!("{}/v1/payment_intents", self.base_url);

        let params = [
            ("amount", amount_minor.to_string()),
            ("currency", "usd".to_string()),
            ("payment_method_types[]", "card".to_string()),
        ];

        let response = self
            .http_client
            .post(&url)
            .basic_auth(&self.secret_key, Option::<&str>::None)
            .form(&params)
            .send()
            .await
            .map_err(|e| PaymentError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(error = %error_text, "Stripe payment intent creation failed");
            return Err(PaymentError::Provider(error_text));
        }

        #[derive(Deserialize)]
        struct IntentResponse {
            client_secret: String,
        }

        let intent: IntentResponse = response
            .json()
            .await
            .map_err(|e| PaymentError::InvalidResponse(e.to_string()))?;

        Ok(intent.client_secret)
    }
}

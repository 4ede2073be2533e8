use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::payments::{to_minor_units, StripeClient};

#[derive(Debug, Deserialize)]
pub struct PaymentRequest {
    pub price: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub client_secret: String,
}

/// POST /create-payment-intent - open a card payment for the given price.
/// The amount is validated before any provider traffic happens.
pub async fn create_payment_intent(
    Json(request): Json<PaymentRequest>,
) -> Result<Json<PaymentResponse>, ApiError> {
    let amount_minor = to_minor_units(request.price)?;
    let client_secret = StripeClient::shared().create_intent(amount_minor).await?;

    tracing::debug!("payment intent opened for {} minor units", amount_minor);
    Ok(Json(PaymentResponse { client_secret }))
}

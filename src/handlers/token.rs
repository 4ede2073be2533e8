use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth::{generate_token, Claims};
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// POST /jwt - exchange an email for a signed bearer token. Identity is
/// asserted by the client; the token only gates routes, the Admin check
/// happens against the user store on every admin request.
pub async fn issue_token(Json(request): Json<TokenRequest>) -> Result<Json<TokenResponse>, ApiError> {
    let claims = Claims::new(request.email.clone());
    let token = generate_token(claims)?;

    tracing::debug!("issued token for '{}'", request.email);
    Ok(Json(TokenResponse { token }))
}

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(email: String) -> Self {
        let now = Utc::now();
        let expiry_hours = config::config().security.token_expiry_hours;
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            email,
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token generation error: {0}")]
    Generation(String),

    #[error("token secret is not configured")]
    MissingSecret,
}

pub fn generate_token(claims: Claims) -> Result<String, TokenError> {
    let secret = &config::config().security.token_secret;

    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    let header = Header::default();

    encode(&header, &claims, &encoding_key).map_err(|e| TokenError::Generation(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, DecodingKey, Validation};

    #[test]
    fn claims_carry_configured_expiry() {
        let claims = Claims::new("someone@example.com".to_string());
        let lifetime = claims.exp - claims.iat;
        let expected = (config::config().security.token_expiry_hours * 3600) as i64;
        assert_eq!(lifetime, expected);
    }

    #[test]
    fn issued_tokens_decode_back_to_claims() {
        let token = generate_token(Claims::new("someone@example.com".to_string())).unwrap();

        let secret = &config::config().security.token_secret;
        let decoded = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )
        .unwrap();

        assert_eq!(decoded.claims.email, "someone@example.com");
        assert!(decoded.claims.exp > decoded.claims.iat);
    }
}

use axum::{extract::Request, http::HeaderMap, middleware::Next, response::Response};
use jsonwebtoken::{decode, DecodingKey, Validation};

use crate::auth::Claims;
use crate::config;
use crate::error::ApiError;

/// Authenticated caller identity extracted from the bearer token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub email: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self { email: claims.email }
    }
}

/// Token gate for protected routes. Validates the bearer token and injects
/// [`AuthUser`] into request extensions for downstream gates and handlers.
pub async fn require_authentication(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers).map_err(|reason| {
        tracing::debug!("rejected request without usable token: {}", reason);
        ApiError::unauthorized("unauthorized access")
    })?;

    let claims = decode_token(&token).map_err(|reason| {
        tracing::debug!("rejected bearer token: {}", reason);
        ApiError::unauthorized("unauthorized access")
    })?;

    request.extensions_mut().insert(AuthUser::from(claims));

    Ok(next.run(request).await)
}

/// Extract the token from the Authorization header
fn extract_bearer_token(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get("authorization")
        .ok_or_else(|| "missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "invalid Authorization header encoding".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("empty bearer token".to_string());
        }
        Ok(token.to_string())
    } else {
        Err("Authorization header must use the Bearer scheme".to_string())
    }
}

/// Validate the token signature and expiry, returning the claims
fn decode_token(token: &str) -> Result<Claims, String> {
    let secret = &config::config().security.token_secret;

    if secret.is_empty() {
        return Err("token secret not configured".to_string());
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::default();

    let token_data =
        decode::<Claims>(token, &decoding_key, &validation).map_err(|e| format!("invalid token: {}", e))?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_authorization(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn rejects_missing_header() {
        let err = extract_bearer_token(&HeaderMap::new()).unwrap_err();
        assert!(err.contains("missing"));
    }

    #[test]
    fn rejects_non_bearer_scheme() {
        let headers = headers_with_authorization("Basic dXNlcjpwYXNz");
        let err = extract_bearer_token(&headers).unwrap_err();
        assert!(err.contains("Bearer"));
    }

    #[test]
    fn rejects_empty_token() {
        let headers = headers_with_authorization("Bearer   ");
        let err = extract_bearer_token(&headers).unwrap_err();
        assert!(err.contains("empty"));
    }

    #[test]
    fn extracts_bearer_token() {
        let headers = headers_with_authorization("Bearer abc.def.ghi");
        assert_eq!(extract_bearer_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn decodes_tokens_issued_by_auth_module() {
        let token = crate::auth::generate_token(Claims::new("voter@example.com".to_string())).unwrap();
        let claims = decode_token(&token).unwrap();
        assert_eq!(claims.email, "voter@example.com");
    }

    #[test]
    fn rejects_garbage_token() {
        assert!(decode_token("not-a-real-token").is_err());
    }
}

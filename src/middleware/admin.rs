use axum::{extract::Request, middleware::Next, response::Response};
use mongodb::bson::doc;

use super::auth::AuthUser;
use crate::database::manager::StoreManager;
use crate::database::models::UserRole;
use crate::error::ApiError;

/// Role gate for admin routes. Runs after [`super::auth::require_authentication`]
/// and checks the stored role for the authenticated email on every request.
pub async fn require_admin(request: Request, next: Next) -> Result<Response, ApiError> {
    let auth_user = request
        .extensions()
        .get::<AuthUser>()
        .cloned()
        .ok_or_else(|| ApiError::unauthorized("unauthorized access"))?;

    let users = StoreManager::users().await?;
    let user = users
        .find_one(doc! { "user_email": auth_user.email.as_str() }, None)
        .await?;

    match user {
        Some(user) if user.role == UserRole::Admin => {
            tracing::debug!("admin access granted to '{}'", auth_user.email);
            Ok(next.run(request).await)
        }
        _ => {
            tracing::warn!("admin access denied to '{}'", auth_user.email);
            Err(ApiError::forbidden("forbidden access"))
        }
    }
}

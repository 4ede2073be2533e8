use axum::extract::{Path, Query};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use futures::TryStreamExt;
use mongodb::bson::doc;
use serde::Deserialize;
use serde_json::json;

use crate::api::format::{DuplicateOutcome, InsertOutcome, UpdateOutcome};
use crate::database::manager::StoreManager;
use crate::database::models::{MembershipStatus, User, UserRole};
use crate::error::ApiError;
use crate::middleware::AuthUser;

/// GET /users/:email - one user record, or null
pub async fn get_user(Path(email): Path<String>) -> Result<Json<Option<User>>, ApiError> {
    let users = StoreManager::users().await?;
    let user = users.find_one(doc! { "user_email": email.as_str() }, None).await?;
    Ok(Json(user))
}

/// POST /users - first-login registration. Clients call this on every
/// sign-in, so an existing record answers with a duplicate notice instead
/// of an error. The unique index on `user_email` closes the window between
/// the lookup and the insert; a concurrent insert lands in the same reply.
pub async fn create_user(Json(user): Json<User>) -> Result<Response, ApiError> {
    let users = StoreManager::users().await?;

    let existing = users.find_one(doc! { "user_email": user.user_email.as_str() }, None).await?;
    if existing.is_some() {
        return Ok(Json(DuplicateOutcome::user_already_exists()).into_response());
    }

    match users.insert_one(&user, None).await {
        Ok(result) => {
            tracing::info!("registered user '{}'", user.user_email);
            Ok(Json(InsertOutcome::from(result)).into_response())
        }
        Err(err) if StoreManager::is_duplicate_key(&err) => {
            Ok(Json(DuplicateOutcome::user_already_exists()).into_response())
        }
        Err(err) => Err(err.into()),
    }
}

/// GET /users/admin/:email - whether the caller holds the Admin role.
/// Callers may only ask about themselves.
pub async fn admin_status(
    Extension(auth_user): Extension<AuthUser>,
    Path(email): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if auth_user.email != email {
        return Err(ApiError::forbidden("forbidden access"));
    }

    let users = StoreManager::users().await?;
    let user = users.find_one(doc! { "user_email": email.as_str() }, None).await?;
    let admin = matches!(user, Some(user) if user.role == UserRole::Admin);
    Ok(Json(json!({ "admin": admin })))
}

/// PATCH /users/payment/:email - mark the caller's membership as paid.
/// Callers may only verify themselves.
pub async fn verify_membership(
    Extension(auth_user): Extension<AuthUser>,
    Path(email): Path<String>,
) -> Result<Json<UpdateOutcome>, ApiError> {
    if auth_user.email != email {
        return Err(ApiError::forbidden("forbidden access"));
    }

    let users = StoreManager::users().await?;
    let result = users
        .update_one(
            doc! { "user_email": email.as_str() },
            doc! { "$set": { "status": MembershipStatus::Verified.as_str() } },
            None,
        )
        .await?;
    Ok(Json(result.into()))
}

/// GET /users - the whole membership roster
pub async fn list_users() -> Result<Json<Vec<User>>, ApiError> {
    let users = StoreManager::users().await?;
    let items: Vec<User> = users.find(None, None).await?.try_collect().await?;
    Ok(Json(items))
}

#[derive(Debug, Deserialize)]
pub struct RoleQuery {
    pub role: Option<String>,
}

/// PATCH /users/:email?role=... - assign a role by email
pub async fn update_role(
    Path(email): Path<String>,
    Query(query): Query<RoleQuery>,
) -> Result<Json<UpdateOutcome>, ApiError> {
    let role: UserRole = query
        .role
        .as_deref()
        .unwrap_or_default()
        .parse()
        .map_err(ApiError::bad_request)?;

    let users = StoreManager::users().await?;
    let result = users
        .update_one(
            doc! { "user_email": email.as_str() },
            doc! { "$set": { "role": role.as_str() } },
            None,
        )
        .await?;
    tracing::info!("role of '{}' set to '{}'", email, role.as_str());
    Ok(Json(result.into()))
}

use axum::extract::Path;
use axum::Json;
use chrono::{DateTime, SecondsFormat, Utc};
use futures::TryStreamExt;
use mongodb::bson::doc;
use serde::Deserialize;

use crate::api::format::{DeleteOutcome, InsertOutcome, UpdateOutcome};
use crate::database::manager::StoreManager;
use crate::database::models::Coupon;
use crate::error::ApiError;

/// GET /coupons
pub async fn list_coupons() -> Result<Json<Vec<Coupon>>, ApiError> {
    let coupons = StoreManager::coupons().await?;
    let items: Vec<Coupon> = coupons.find(None, None).await?.try_collect().await?;
    Ok(Json(items))
}

/// GET /coupons/:id - one coupon, or null
pub async fn get_coupon(Path(id): Path<String>) -> Result<Json<Option<Coupon>>, ApiError> {
    let id = super::parse_object_id(&id)?;
    let coupons = StoreManager::coupons().await?;
    let coupon = coupons.find_one(doc! { "_id": id }, None).await?;
    Ok(Json(coupon))
}

/// POST /coupons
pub async fn create_coupon(Json(coupon): Json<Coupon>) -> Result<Json<InsertOutcome>, ApiError> {
    let coupons = StoreManager::coupons().await?;
    let result = coupons.insert_one(&coupon, None).await?;
    tracing::info!("coupon '{}' created", coupon.code);
    Ok(Json(result.into()))
}

#[derive(Debug, Deserialize)]
pub struct CouponEdit {
    pub code: String,
    pub expiry_date: DateTime<Utc>,
    pub description: String,
    pub discount_amount: f64,
}

/// PUT /coupons/:id - unlike product edits, editing a missing coupon is a
/// no-op rather than an upsert
pub async fn update_coupon(
    Path(id): Path<String>,
    Json(edit): Json<CouponEdit>,
) -> Result<Json<UpdateOutcome>, ApiError> {
    let id = super::parse_object_id(&id)?;

    // Stored in the same RFC 3339 form the model writes on insert
    let expiry = edit.expiry_date.to_rfc3339_opts(SecondsFormat::AutoSi, true);
    let update = doc! { "$set": {
        "code": edit.code,
        "expiry_date": expiry,
        "description": edit.description,
        "discount_amount": edit.discount_amount,
    }};

    let coupons = StoreManager::coupons().await?;
    let result = coupons.update_one(doc! { "_id": id }, update, None).await?;
    Ok(Json(result.into()))
}

/// DELETE /coupons/:id
pub async fn delete_coupon(Path(id): Path<String>) -> Result<Json<DeleteOutcome>, ApiError> {
    let id = super::parse_object_id(&id)?;
    let coupons = StoreManager::coupons().await?;
    let result = coupons.delete_one(doc! { "_id": id }, None).await?;
    Ok(Json(result.into()))
}

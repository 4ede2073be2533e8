use axum::extract::Path;
use axum::Json;
use futures::TryStreamExt;
use mongodb::bson::doc;

use crate::api::format::InsertOutcome;
use crate::database::manager::StoreManager;
use crate::database::models::Review;
use crate::error::ApiError;

/// GET /reviews
pub async fn list_reviews() -> Result<Json<Vec<Review>>, ApiError> {
    let reviews = StoreManager::reviews().await?;
    let items: Vec<Review> = reviews.find(None, None).await?.try_collect().await?;
    Ok(Json(items))
}

/// GET /reviews/:id - reviews for one product. The path segment is the
/// product id a review points at, matched as the stored string.
pub async fn product_reviews(Path(id): Path<String>) -> Result<Json<Vec<Review>>, ApiError> {
    let reviews = StoreManager::reviews().await?;
    let items: Vec<Review> = reviews
        .find(doc! { "product_Id": id.as_str() }, None)
        .await?
        .try_collect()
        .await?;
    Ok(Json(items))
}

/// POST /reviews
pub async fn create_review(Json(review): Json<Review>) -> Result<Json<InsertOutcome>, ApiError> {
    let reviews = StoreManager::reviews().await?;
    let result = reviews.insert_one(&review, None).await?;
    tracing::debug!("review added for product '{}'", review.product_id);
    Ok(Json(result.into()))
}

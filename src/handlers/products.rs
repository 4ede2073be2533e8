use axum::extract::{Path, Query};
use axum::Json;
use futures::TryStreamExt;
use mongodb::bson::{doc, Bson, Document, Regex};
use mongodb::options::{FindOptions, UpdateOptions};
use serde::Deserialize;

use crate::api::format::{CountOutcome, DeleteOutcome, InsertOutcome, UpdateOutcome};
use crate::database::manager::StoreManager;
use crate::database::models::{Product, ProductStatus};
use crate::error::ApiError;

/// Maximum number of entries returned by the featured and trending feeds
const SHOWCASE_LIMIT: i64 = 6;

/// GET /products - every product, regardless of status
pub async fn list_products() -> Result<Json<Vec<Product>>, ApiError> {
    let products = StoreManager::products().await?;
    let items: Vec<Product> = products.find(None, None).await?.try_collect().await?;
    Ok(Json(items))
}

/// GET /products/:id - one product, or null when nothing matches
pub async fn get_product(Path(id): Path<String>) -> Result<Json<Option<Product>>, ApiError> {
    let id = super::parse_object_id(&id)?;
    let products = StoreManager::products().await?;
    let product = products.find_one(doc! { "_id": id }, None).await?;
    Ok(Json(product))
}

/// GET /products/email/:email - products submitted by one owner
pub async fn products_by_owner(Path(email): Path<String>) -> Result<Json<Vec<Product>>, ApiError> {
    let products = StoreManager::products().await?;
    let items: Vec<Product> = products
        .find(doc! { "owner_email": email.as_str() }, None)
        .await?
        .try_collect()
        .await?;
    Ok(Json(items))
}

/// GET /featured - newest featured accepted products
pub async fn featured_products() -> Result<Json<Vec<Product>>, ApiError> {
    let (filter, options) = featured_feed();
    let products = StoreManager::products().await?;
    let items: Vec<Product> = products.find(filter, options).await?.try_collect().await?;
    Ok(Json(items))
}

/// GET /trending - accepted products by descending vote count
pub async fn trending_products() -> Result<Json<Vec<Product>>, ApiError> {
    let (filter, options) = trending_feed();
    let products = StoreManager::products().await?;
    let items: Vec<Product> = products.find(filter, options).await?.try_collect().await?;
    Ok(Json(items))
}

#[derive(Debug, Deserialize)]
pub struct BrowseQuery {
    pub page: Option<String>,
    pub size: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
}

/// GET /all-products - paginated tag search over accepted products
pub async fn browse_products(Query(query): Query<BrowseQuery>) -> Result<Json<Vec<Product>>, ApiError> {
    let (page, size) = parse_pagination(query.page.as_deref(), query.size.as_deref())?;
    let skip = page
        .checked_mul(size as u64)
        .ok_or_else(|| ApiError::bad_request("page out of range"))?;

    let filter = accepted_tag_filter(query.search.as_deref().unwrap_or(""));
    let options = FindOptions::builder().skip(skip).limit(size).build();

    let products = StoreManager::products().await?;
    let items: Vec<Product> = products.find(filter, options).await?.try_collect().await?;
    Ok(Json(items))
}

/// GET /all-products-count - total matching the same filter as the listing
pub async fn browse_products_count(Query(query): Query<SearchQuery>) -> Result<Json<CountOutcome>, ApiError> {
    let filter = accepted_tag_filter(query.search.as_deref().unwrap_or(""));

    let products = StoreManager::products().await?;
    let count = products.count_documents(filter, None).await?;
    Ok(Json(CountOutcome { count }))
}

/// GET /products-review-queue - all products with non-final statuses first
pub async fn review_queue() -> Result<Json<Vec<Product>>, ApiError> {
    let options = FindOptions::builder().sort(doc! { "status": -1 }).build();

    let products = StoreManager::products().await?;
    let items: Vec<Product> = products.find(None, options).await?.try_collect().await?;
    Ok(Json(items))
}

/// GET /reported-products
pub async fn reported_products() -> Result<Json<Vec<Product>>, ApiError> {
    let products = StoreManager::products().await?;
    let items: Vec<Product> = products
        .find(doc! { "reported": true }, None)
        .await?
        .try_collect()
        .await?;
    Ok(Json(items))
}

#[derive(Debug, Deserialize)]
pub struct UpvoteQuery {
    pub email: Option<String>,
}

/// PATCH /products/upvote/:id - one atomic counter increment per request.
/// The voter email is logged for traceability, not stored.
pub async fn upvote_product(
    Path(id): Path<String>,
    Query(query): Query<UpvoteQuery>,
) -> Result<Json<UpdateOutcome>, ApiError> {
    let id = super::parse_object_id(&id)?;
    if let Some(email) = query.email.as_deref() {
        tracing::debug!("upvote on {} by '{}'", id, email);
    }

    let products = StoreManager::products().await?;
    let result = products
        .update_one(doc! { "_id": id }, doc! { "$inc": { "upvote_count": 1 } }, None)
        .await?;
    Ok(Json(result.into()))
}

/// PATCH /products/report/:id
pub async fn report_product(Path(id): Path<String>) -> Result<Json<UpdateOutcome>, ApiError> {
    let id = super::parse_object_id(&id)?;
    let products = StoreManager::products().await?;
    let result = products
        .update_one(doc! { "_id": id }, doc! { "$set": { "reported": true } }, None)
        .await?;
    Ok(Json(result.into()))
}

/// PATCH /products/featured/:id
pub async fn feature_product(Path(id): Path<String>) -> Result<Json<UpdateOutcome>, ApiError> {
    let id = super::parse_object_id(&id)?;
    let products = StoreManager::products().await?;
    let result = products
        .update_one(doc! { "_id": id }, doc! { "$set": { "featured": true } }, None)
        .await?;
    Ok(Json(result.into()))
}

/// PATCH /products/accepted/:id - idempotent, re-accepting is allowed
pub async fn accept_product(Path(id): Path<String>) -> Result<Json<UpdateOutcome>, ApiError> {
    set_product_status(&id, ProductStatus::Accepted).await
}

/// PATCH /products/rejected/:id
pub async fn reject_product(Path(id): Path<String>) -> Result<Json<UpdateOutcome>, ApiError> {
    set_product_status(&id, ProductStatus::Rejected).await
}

async fn set_product_status(id: &str, status: ProductStatus) -> Result<Json<UpdateOutcome>, ApiError> {
    let id = super::parse_object_id(id)?;
    let products = StoreManager::products().await?;
    let result = products
        .update_one(doc! { "_id": id }, status_update(status), None)
        .await?;
    Ok(Json(result.into()))
}

/// POST /add-product - insert the submission, then bump the owner's
/// submission counter. The writes are independent; a counter failure
/// surfaces as an error while the insert stands.
pub async fn create_product(Json(product): Json<Product>) -> Result<Json<InsertOutcome>, ApiError> {
    let products = StoreManager::products().await?;
    let result = products.insert_one(&product, None).await?;
    tracing::debug!("product submitted by '{}'", product.owner_email);

    let users = StoreManager::users().await?;
    users
        .update_one(
            doc! { "user_email": product.owner_email.as_str() },
            doc! { "$inc": { "product_add_count": 1 } },
            None,
        )
        .await?;

    Ok(Json(result.into()))
}

#[derive(Debug, Deserialize)]
pub struct ProductEdit {
    pub product_name: String,
    pub product_image: String,
    pub product_tags: Vec<String>,
    pub external_links: Vec<String>,
    pub description: String,
}

/// PUT /update-product/:id - replace the editable fields, creating the
/// document under that id when it does not exist
pub async fn update_product(
    Path(id): Path<String>,
    Json(edit): Json<ProductEdit>,
) -> Result<Json<UpdateOutcome>, ApiError> {
    let id = super::parse_object_id(&id)?;
    let products = StoreManager::products().await?;
    let result = products
        .update_one(doc! { "_id": id }, edit_update(edit), edit_options())
        .await?;
    Ok(Json(result.into()))
}

/// DELETE /add-product/:id
pub async fn delete_product(Path(id): Path<String>) -> Result<Json<DeleteOutcome>, ApiError> {
    let id = super::parse_object_id(&id)?;
    let products = StoreManager::products().await?;
    let result = products.delete_one(doc! { "_id": id }, None).await?;
    Ok(Json(result.into()))
}

/// Query for the featured feed: featured accepted products, newest first,
/// capped at the showcase size
fn featured_feed() -> (Document, FindOptions) {
    let filter = doc! { "featured": true, "status": ProductStatus::Accepted.as_str() };
    let options = FindOptions::builder()
        .sort(doc! { "timestamp": -1 })
        .limit(SHOWCASE_LIMIT)
        .build();
    (filter, options)
}

/// Query for the trending feed: accepted products by descending vote count,
/// capped at the showcase size
fn trending_feed() -> (Document, FindOptions) {
    let filter = doc! { "status": ProductStatus::Accepted.as_str() };
    let options = FindOptions::builder()
        .sort(doc! { "upvote_count": -1 })
        .limit(SHOWCASE_LIMIT)
        .build();
    (filter, options)
}

/// Moderation decisions are plain status overwrites, so repeating one
/// rewrites the same value instead of failing
fn status_update(status: ProductStatus) -> Document {
    doc! { "$set": { "status": status.as_str() } }
}

/// The editable fields, replaced together in one `$set`. Status, votes and
/// moderation flags are out of reach of an edit.
fn edit_update(edit: ProductEdit) -> Document {
    doc! { "$set": {
        "product_name": edit.product_name,
        "product_image": edit.product_image,
        "product_tags": edit.product_tags,
        "external_links": edit.external_links,
        "description": edit.description,
    }}
}

/// Edits create the document when the id is unknown
fn edit_options() -> UpdateOptions {
    UpdateOptions::builder().upsert(true).build()
}

/// Filter shared by the browse listing and its count so page contents and
/// totals always agree: accepted products with a tag matching the pattern,
/// case-insensitively. An empty pattern matches any tag.
fn accepted_tag_filter(search: &str) -> Document {
    let pattern = Regex {
        pattern: search.to_string(),
        options: "i".to_string(),
    };

    doc! {
        "product_tags": { "$in": [Bson::RegularExpression(pattern)] },
        "status": ProductStatus::Accepted.as_str(),
    }
}

/// Both parameters are required; the route has no default page geometry
fn parse_pagination(page: Option<&str>, size: Option<&str>) -> Result<(u64, i64), ApiError> {
    let page = page.and_then(|v| v.parse::<u64>().ok());
    let size = size.and_then(|v| v.parse::<i64>().ok()).filter(|s| *s >= 0);

    match (page, size) {
        (Some(page), Some(size)) => Ok((page, size)),
        _ => Err(ApiError::bad_request("page and size must be non-negative integers")),
    }
}

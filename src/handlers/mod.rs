pub mod coupons;
pub mod payments;
pub mod products;
pub mod reviews;
pub mod token;
pub mod users;

use mongodb::bson::oid::ObjectId;

use crate::error::ApiError;

/// Parse a path segment into a store object id, rejecting malformed input
/// before any store round-trip.
pub(crate) fn parse_object_id(id: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(id).map_err(|_| ApiError::bad_request(format!("invalid id: {}", id)))
}

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A product review. Reviews reference their product by raw hex id through
/// the stored `product_Id` field; the reference is not validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    #[serde(
        rename = "_id",
        skip_serializing_if = "Option::is_none",
        serialize_with = "super::serialize_object_id_as_hex",
        default
    )]
    pub id: Option<ObjectId>,
    #[serde(rename = "product_Id")]
    pub product_id: String,
    pub reviewer_name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub reviewer_image: Option<String>,
    pub description: String,
    pub rating: f64,
}

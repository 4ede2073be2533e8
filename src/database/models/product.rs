use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A submitted product. Submissions enter the moderation queue as `pending`
/// and only `accepted` products surface in the public discovery feeds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(
        rename = "_id",
        skip_serializing_if = "Option::is_none",
        serialize_with = "super::serialize_object_id_as_hex",
        default
    )]
    pub id: Option<ObjectId>,
    pub product_name: String,
    pub product_image: String,
    #[serde(default)]
    pub product_tags: Vec<String>,
    #[serde(default)]
    pub external_links: Vec<String>,
    #[serde(default)]
    pub description: String,
    pub owner_email: String,
    #[serde(default)]
    pub upvote_count: i64,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub reported: bool,
    #[serde(default)]
    pub status: ProductStatus,
    #[serde(default = "Utc::now", serialize_with = "super::serialize_timestamp_millis")]
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl ProductStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ProductStatus::Pending => "pending",
            ProductStatus::Accepted => "accepted",
            ProductStatus::Rejected => "rejected",
        }
    }
}

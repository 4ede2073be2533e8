use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coupon {
    #[serde(
        rename = "_id",
        skip_serializing_if = "Option::is_none",
        serialize_with = "super::serialize_object_id_as_hex",
        default
    )]
    pub id: Option<ObjectId>,
    pub code: String,
    pub expiry_date: DateTime<Utc>,
    pub description: String,
    pub discount_amount: f64,
}

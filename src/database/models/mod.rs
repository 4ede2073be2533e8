mod coupon;
mod product;
mod review;
mod user;

pub use coupon::Coupon;
pub use product::{Product, ProductStatus};
pub use review::Review;
pub use user::{MembershipStatus, User, UserRole};

use chrono::{DateTime, SecondsFormat, Utc};
use mongodb::bson::oid::ObjectId;
use serde::Serializer;

/// Render a store-assigned id as its hex form on the wire. Ids are skipped
/// when absent, so inserts never serialize this field.
pub(crate) fn serialize_object_id_as_hex<S>(
    id: &Option<ObjectId>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match id {
        Some(oid) => serializer.serialize_str(&oid.to_hex()),
        None => serializer.serialize_none(),
    }
}

/// Render a timestamp with fixed three-digit fractional seconds. The stored
/// strings are compared lexicographically by the feed sort, and only a fixed
/// width keeps that comparison chronological.
pub(crate) fn serialize_timestamp_millis<S>(
    timestamp: &DateTime<Utc>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
}

//! Wire shapes for write acknowledgements.
//!
//! Mutation handlers relay the store's acknowledgement in the camelCase form
//! the frontend already consumes, with store-assigned ids rendered as hex.

use mongodb::bson::Bson;
use mongodb::results::{DeleteResult, InsertOneResult, UpdateResult};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOutcome {
    pub acknowledged: bool,
    pub inserted_id: Value,
}

impl From<InsertOneResult> for InsertOutcome {
    fn from(result: InsertOneResult) -> Self {
        Self {
            acknowledged: true,
            inserted_id: id_value(result.inserted_id),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_id: Option<Value>,
}

impl From<UpdateResult> for UpdateOutcome {
    fn from(result: UpdateResult) -> Self {
        Self {
            acknowledged: true,
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_id: result.upserted_id.map(id_value),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl From<DeleteResult> for DeleteOutcome {
    fn from(result: DeleteResult) -> Self {
        Self {
            acknowledged: true,
            deleted_count: result.deleted_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CountOutcome {
    pub count: u64,
}

/// Reply for a first-login insert that found the email already registered
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateOutcome {
    pub message: &'static str,
    pub inserted_id: Option<Value>,
}

impl DuplicateOutcome {
    pub fn user_already_exists() -> Self {
        Self {
            message: "user already exists",
            inserted_id: None,
        }
    }
}

fn id_value(id: Bson) -> Value {
    match id {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        other => other.into_relaxed_extjson(),
    }
}

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(
        rename = "_id",
        skip_serializing_if = "Option::is_none",
        serialize_with = "super::serialize_object_id_as_hex",
        default
    )]
    pub id: Option<ObjectId>,
    pub user_name: String,
    pub user_email: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub user_photo: Option<String>,
    #[serde(default)]
    pub role: UserRole,
    /// Set to `Verified` once the membership payment clears
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub status: Option<MembershipStatus>,
    #[serde(default)]
    pub product_add_count: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum UserRole {
    #[serde(rename = "default")]
    #[default]
    Default,
    Admin,
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::Default => "default",
            UserRole::Admin => "Admin",
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(UserRole::Default),
            "Admin" => Ok(UserRole::Admin),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MembershipStatus {
    Verified,
}

impl MembershipStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            MembershipStatus::Verified => "Verified",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn role_defaults_when_absent() {
        let user: User = serde_json::from_value(json!({
            "user_name": "Dana",
            "user_email": "dana@example.com"
        }))
        .unwrap();

        assert_eq!(user.role, UserRole::Default);
        assert_eq!(user.product_add_count, 0);
        assert!(user.status.is_none());
    }

    #[test]
    fn role_spelling_matches_stored_documents() {
        assert_eq!(serde_json::to_value(UserRole::Admin).unwrap(), json!("Admin"));
        assert_eq!(serde_json::to_value(UserRole::Default).unwrap(), json!("default"));

        let admin: UserRole = serde_json::from_value(json!("Admin")).unwrap();
        assert_eq!(admin, UserRole::Admin);
    }

    #[test]
    fn role_parse_agrees_with_as_str() {
        for role in [UserRole::Default, UserRole::Admin] {
            assert_eq!(role.as_str().parse::<UserRole>().unwrap(), role);
        }
        assert!("superuser".parse::<UserRole>().is_err());
    }

    #[test]
    fn membership_status_serializes_verified() {
        assert_eq!(serde_json::to_value(MembershipStatus::Verified).unwrap(), json!("Verified"));
    }
}

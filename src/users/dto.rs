use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::users::repo::User;

/// Public part of a user record, camelCase on the wire.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub data: PublicUser,
}

#[derive(Debug, Serialize)]
pub struct UserList {
    pub data: Vec<PublicUser>,
}

#[derive(Debug, Deserialize)]
pub struct UserCreateInput {
    pub username: String,
    pub password: String,
}

/// Partial update; both fields are non-nullable, so null and omitted are
/// equivalent here.
#[derive(Debug, Default, Deserialize)]
pub struct UserUpdateInput {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn sample() -> PublicUser {
        PublicUser {
            id: Uuid::new_v4(),
            username: "alice".into(),
            created_at: datetime!(2024-01-01 00:00:00 UTC),
            updated_at: datetime!(2024-01-02 12:30:00 UTC),
        }
    }

    #[test]
    fn public_user_serializes_camel_case_rfc3339() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["username"], "alice");
        assert_eq!(json["createdAt"], "2024-01-01T00:00:00Z");
        assert_eq!(json["updatedAt"], "2024-01-02T12:30:00Z");
        assert!(json.get("password").is_none());
    }

    #[test]
    fn update_input_treats_null_as_absent() {
        let input: UserUpdateInput =
            serde_json::from_str(r#"{"username": null, "password": null}"#).unwrap();
        assert!(input.username.is_none());
        assert!(input.password.is_none());

        let input: UserUpdateInput = serde_json::from_str(r#"{}"#).unwrap();
        assert!(input.username.is_none());
        assert!(input.password.is_none());
    }
}

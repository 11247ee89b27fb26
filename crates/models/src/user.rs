//! Console user entity and DTOs.

use qms_core::datetime::deserialize_timestamp;
use qms_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};

/// A console user as returned by the backend.
///
/// **Note:** the password is write-only. It exists on [`CreateUser`] and
/// [`UpdateUser`] and is never read back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: DbId,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub mobile: String,
    pub active: bool,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub created_at: Option<Timestamp>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub updated_at: Option<Timestamp>,
    /// Soft-delete marker.
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub deleted_at: Option<Timestamp>,
}

#[derive(Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub mobile: String,
    pub password: String,
    pub active: bool,
}

/// DTO for replacing a user. Leaving `password` as `None` keeps the current one.
#[derive(Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub mobile: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub active: bool,
}

impl std::fmt::Debug for CreateUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateUser")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("mobile", &self.mobile)
            .field("password", &"<redacted>")
            .field("active", &self.active)
            .finish()
    }
}

impl std::fmt::Debug for UpdateUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateUser")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("mobile", &self.mobile)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("active", &self.active)
            .finish()
    }
}

impl From<&User> for UpdateUser {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            username: u.username.clone(),
            email: u.email.clone(),
            mobile: u.mobile.clone(),
            password: None,
            active: u.active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_in_a_response_is_dropped() {
        let json = r#"{"id":2,"username":"qc","email":"qc@example.com","mobile":"1380000",
            "active":true,"password":"hunter2","deletedAt":null}"#;
        let user: User = serde_json::from_str(json).unwrap();
        let back = serde_json::to_value(&user).unwrap();
        assert!(back.get("password").is_none());
        assert_eq!(user.deleted_at, None);
    }

    #[test]
    fn space_separated_timestamps_are_read() {
        let json = r#"{"id":3,"username":"line","active":true,
            "createdAt":"2024-04-30 08:00:00","updatedAt":"not a date"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(
            user.created_at.map(|ts| ts.format("%Y-%m-%d %H:%M").to_string()).as_deref(),
            Some("2024-04-30 08:00")
        );
        assert_eq!(user.updated_at, None);
    }

    #[test]
    fn update_without_password_omits_the_field() {
        let dto = UpdateUser {
            id: 2,
            username: "qc".into(),
            email: "qc@example.com".into(),
            mobile: "1380000".into(),
            password: None,
            active: false,
        };
        let json = serde_json::to_value(&dto).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["active"], false);
    }

    #[test]
    fn debug_output_redacts_password() {
        let dto = CreateUser {
            username: "qc".into(),
            email: String::new(),
            mobile: String::new(),
            password: "hunter2".into(),
            active: true,
        };
        assert!(!format!("{dto:?}").contains("hunter2"));
    }
}

//! Session user model
//!
//! The payload served by the auth endpoint, cached for the lifetime of
//! the process by the session service.

use serde::{Deserialize, Serialize};

/// Role of a signed-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    User,
}

/// The signed-in user as reported by the auth endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    /// User id
    pub id: String,
    /// Role driving admin-only UI
    pub role: UserRole,
    /// Display name, if the user set one
    pub name: Option<String>,
    /// Account email
    pub email: Option<String>,
    /// Avatar URL
    pub image: Option<String>,
    /// Whether two-factor auth is enabled for the account
    pub two_factor_enabled: Option<bool>,
    /// Whether the current session passed two-factor verification
    pub two_factor_verified: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_user_deserialize() {
        let json = r#"{
            "id": "user-123",
            "role": "admin",
            "name": "Ada",
            "email": "ada@example.com",
            "image": null,
            "twoFactorEnabled": true,
            "twoFactorVerified": false
        }"#;

        let user: SessionUser = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, "user-123");
        assert_eq!(user.role, UserRole::Admin);
        assert_eq!(user.name.as_deref(), Some("Ada"));
        assert_eq!(user.two_factor_enabled, Some(true));
        assert!(!user.two_factor_verified);
    }

    #[test]
    fn test_session_user_optional_fields_default() {
        let json = r#"{
            "id": "user-456",
            "role": "user",
            "twoFactorVerified": true
        }"#;

        let user: SessionUser = serde_json::from_str(json).unwrap();
        assert_eq!(user.role, UserRole::User);
        assert!(user.name.is_none());
        assert!(user.email.is_none());
        assert!(user.two_factor_enabled.is_none());
    }

    #[test]
    fn test_session_user_serialize_camel_case() {
        let user = SessionUser {
            id: "user-789".to_string(),
            role: UserRole::User,
            name: None,
            email: None,
            image: None,
            two_factor_enabled: Some(false),
            two_factor_verified: true,
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("twoFactorEnabled"));
        assert!(json.contains("twoFactorVerified"));
        assert!(json.contains("\"role\":\"user\""));
    }
}

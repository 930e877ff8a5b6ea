use serde::{Deserialize, Serialize};

use crate::pii::Masked;

/// Profile returned by `GET /users/me`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default)]
    pub mobile_no: String,
    #[serde(default)]
    pub passport_number: Masked<String>,
    #[serde(default)]
    pub country: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    #[serde(default)]
    pub middle_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub gender: String,
    pub passport_number: Masked<String>,
    pub mobile_no: String,
    pub country: String,
    pub password: Masked<String>,
    /// Checked locally, never sent upstream.
    #[serde(default, skip_serializing)]
    pub confirm_password: Masked<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: Masked<String>,
}

/// Response of login and register. `message` carries the upstream's
/// explanation on failures that still came back as JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<Masked<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: Masked<String>,
    pub new_password: Masked<String>,
    #[serde(default, skip_serializing)]
    pub confirm_password: Masked<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmation_not_sent_upstream() {
        let req = ChangePasswordRequest {
            current_password: Masked::from("OldPass1"),
            new_password: Masked::from("NewPass1"),
            confirm_password: Masked::from("NewPass1"),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "currentPassword": "OldPass1", "newPassword": "NewPass1" })
        );
    }

    #[test]
    fn test_user_debug_hides_passport() {
        let json = r#"
            {
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": "ada@example.com",
                "mobileNo": "+44 20 7946 0000",
                "passportNumber": "X1234567",
                "country": "UK"
            }
        "#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.passport_number.expose(), "X1234567");
        assert!(!format!("{:?}", user).contains("X1234567"));
    }
}

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::user::User;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginPayload {
    /// Username or email.
    #[validate(length(min = 1))]
    pub identifier: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user_id: i64,
    /// Simulated out-of-band delivery: the code is returned in the response.
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyTwoFactorPayload {
    pub user_id: i64,
    #[validate(length(min = 1))]
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: String,
    pub image_path: Option<String>,
}

impl From<User> for AuthenticatedUserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role.display_role().to_string(),
            image_path: user.image_path,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterPayload {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
    /// "candidate" or "company"; admins are seeded, not registered.
    #[validate(length(min = 1))]
    pub role: String,
    /// Required by the frontend when registering a company.
    pub company_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn register_payload_names_missing_fields() {
        let payload = RegisterPayload {
            username: "".into(),
            email: "no-es-email".into(),
            password: "".into(),
            role: "candidate".into(),
            company_name: None,
        };
        let errs = payload.validate().unwrap_err();
        let fields = errs.field_errors();
        assert!(fields.contains_key("username"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    // The seed accounts use short passwords like "pw123"; registration must
    // not impose a length floor the login flow never had.
    #[test]
    fn register_payload_accepts_short_passwords() {
        let payload = RegisterPayload {
            username: "ana".into(),
            email: "ana@x.com".into(),
            password: "pw123".into(),
            role: "candidate".into(),
            company_name: None,
        };
        assert!(payload.validate().is_ok());
    }
}

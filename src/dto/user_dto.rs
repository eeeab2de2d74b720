use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::user::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: String,
    pub image_path: Option<String>,
    pub removed: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role.display_role().to_string(),
            image_path: user.image_path,
            removed: user.removed,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateUserPayload {
    #[validate(length(min = 1))]
    pub username: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 1))]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangeRolePayload {
    #[validate(length(min = 1))]
    pub role: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminListQuery {
    #[serde(default)]
    pub include_removed: bool,
}

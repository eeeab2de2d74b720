use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Candidate,
    Company,
}

impl Role {
    /// Role string the frontend routes on. Historical naming: candidates are
    /// "user" and companies are "recruiter".
    pub fn display_role(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Candidate => "user",
            Role::Company => "recruiter",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "candidate" => Ok(Role::Candidate),
            "company" => Ok(Role::Company),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub image_path: Option<String>,
    pub removed: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_role_mapping_is_fixed() {
        assert_eq!(Role::Admin.display_role(), "admin");
        assert_eq!(Role::Candidate.display_role(), "user");
        assert_eq!(Role::Company.display_role(), "recruiter");
    }

    #[test]
    fn role_parses_from_storage_form() {
        assert_eq!("candidate".parse::<Role>().unwrap(), Role::Candidate);
        assert!("recruiter".parse::<Role>().is_err());
    }
}

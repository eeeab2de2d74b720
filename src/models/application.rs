use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    InReview,
    Accepted,
    Rejected,
}

impl std::str::FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ApplicationStatus::Pending),
            "in_review" => Ok(ApplicationStatus::InReview),
            "accepted" => Ok(ApplicationStatus::Accepted),
            "rejected" => Ok(ApplicationStatus::Rejected),
            other => Err(format!("unknown application status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Application {
    pub id: i64,
    pub candidate_id: i64,
    pub vacancy_id: i64,
    pub applied_at: DateTime<Utc>,
    pub status: ApplicationStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_from_wire_form() {
        assert_eq!(
            "in_review".parse::<ApplicationStatus>().unwrap(),
            ApplicationStatus::InReview
        );
        assert!("reviewing".parse::<ApplicationStatus>().is_err());
    }
}

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Candidate {
    pub id: i64,
    pub user_id: i64,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub education: Option<String>,
    pub experience: Option<String>,
    pub cv_path: Option<String>,
}

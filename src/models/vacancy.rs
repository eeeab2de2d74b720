use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VacancyStatus {
    Open,
    Closed,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vacancy {
    pub id: i64,
    pub company_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub salary: Option<Decimal>,
    pub contract_type: Option<String>,
    pub location: Option<String>,
    pub published_at: DateTime<Utc>,
    pub closes_at: Option<DateTime<Utc>>,
    pub status: VacancyStatus,
    pub applications_count: i32,
    pub featured: bool,
    pub removed: bool,
}

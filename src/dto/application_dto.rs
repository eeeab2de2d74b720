use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::application::Application;
use crate::models::vacancy::Vacancy;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateApplicationPayload {
    /// User id of the acting account; must belong to a candidate.
    pub user_id: i64,
    pub vacancy_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateApplicationPayload {
    #[validate(length(min = 1))]
    pub status: String,
}

/// Application joined with its vacancy, as listed on the candidate's panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationWithVacancy {
    #[serde(flatten)]
    pub application: Application,
    pub vacancy: Vacancy,
}

use crate::dto::application_dto::ApplicationWithVacancy;
use crate::error::Result;
use crate::models::application::Application;
use crate::models::vacancy::Vacancy;
use crate::repositories::vacancy_repo::VACANCY_COLUMNS;
use sqlx::{PgPool, Row};

const APPLICATION_COLUMNS: &str = "id, candidate_id, vacancy_id, applied_at, status";

#[derive(Clone)]
pub struct ApplicationRepo {
    pool: PgPool,
}

impl ApplicationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Candidate's applications with the vacancy each one targets. Removed
    /// vacancies stay visible here so the candidate keeps their history.
    pub async fn find_by_owner(&self, candidate_id: i64) -> Result<Vec<ApplicationWithVacancy>> {
        let rows = sqlx::query(&format!(
            "SELECT a.id, a.candidate_id, a.vacancy_id, a.applied_at, a.status,
                    {}
             FROM applications a
             JOIN vacancies v ON v.id = a.vacancy_id
             WHERE a.candidate_id = $1
             ORDER BY a.applied_at DESC",
            VACANCY_COLUMNS
                .split(", ")
                .map(|c| format!("v.{} AS \"v_{}\"", c, c))
                .collect::<Vec<_>>()
                .join(", ")
        ))
        .bind(candidate_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                let application = Application {
                    id: row.try_get("id")?,
                    candidate_id: row.try_get("candidate_id")?,
                    vacancy_id: row.try_get("vacancy_id")?,
                    applied_at: row.try_get("applied_at")?,
                    status: row.try_get("status")?,
                };
                let vacancy = Vacancy {
                    id: row.try_get("v_id")?,
                    company_id: row.try_get("v_company_id")?,
                    title: row.try_get("v_title")?,
                    description: row.try_get("v_description")?,
                    requirements: row.try_get("v_requirements")?,
                    salary: row.try_get("v_salary")?,
                    contract_type: row.try_get("v_contract_type")?,
                    location: row.try_get("v_location")?,
                    published_at: row.try_get("v_published_at")?,
                    closes_at: row.try_get("v_closes_at")?,
                    status: row.try_get("v_status")?,
                    applications_count: row.try_get("v_applications_count")?,
                    featured: row.try_get("v_featured")?,
                    removed: row.try_get("v_removed")?,
                };
                Ok(ApplicationWithVacancy {
                    application,
                    vacancy,
                })
            })
            .collect()
    }

    /// Applications received on one vacancy, for the company panel.
    pub async fn find_by_vacancy(&self, vacancy_id: i64) -> Result<Vec<Application>> {
        let applications = sqlx::query_as::<_, Application>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications
             WHERE vacancy_id = $1
             ORDER BY applied_at DESC"
        ))
        .bind(vacancy_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(applications)
    }

}

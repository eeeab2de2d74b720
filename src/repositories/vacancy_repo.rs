use crate::dto::vacancy_dto::{CreateVacancyPayload, UpdateVacancyPayload};
use crate::error::{Error, Result};
use crate::models::vacancy::Vacancy;
use sqlx::PgPool;

pub const VACANCY_COLUMNS: &str = "id, company_id, title, description, requirements, salary, \
     contract_type, location, published_at, closes_at, status, applications_count, featured, removed";

#[derive(Clone)]
pub struct VacancyRepo {
    pool: PgPool,
}

impl VacancyRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Vacancy>> {
        let vacancy = sqlx::query_as::<_, Vacancy>(&format!(
            "SELECT {VACANCY_COLUMNS} FROM vacancies WHERE id = $1 AND NOT removed"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(vacancy)
    }

    /// Public board: open vacancies only, featured first, newest first.
    pub async fn list_open(&self) -> Result<Vec<Vacancy>> {
        let vacancies = sqlx::query_as::<_, Vacancy>(&format!(
            "SELECT {VACANCY_COLUMNS} FROM vacancies
             WHERE status = 'open' AND NOT removed
             ORDER BY featured DESC, published_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(vacancies)
    }

    pub async fn list(&self, include_removed: bool) -> Result<Vec<Vacancy>> {
        let vacancies = sqlx::query_as::<_, Vacancy>(&format!(
            "SELECT {VACANCY_COLUMNS} FROM vacancies
             WHERE ($1 OR NOT removed)
             ORDER BY published_at DESC"
        ))
        .bind(include_removed)
        .fetch_all(&self.pool)
        .await?;
        Ok(vacancies)
    }

    pub async fn find_by_owner(&self, company_id: i64) -> Result<Vec<Vacancy>> {
        let vacancies = sqlx::query_as::<_, Vacancy>(&format!(
            "SELECT {VACANCY_COLUMNS} FROM vacancies
             WHERE company_id = $1 AND NOT removed
             ORDER BY published_at DESC"
        ))
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(vacancies)
    }

    pub async fn insert(&self, company_id: i64, payload: &CreateVacancyPayload) -> Result<Vacancy> {
        let vacancy = sqlx::query_as::<_, Vacancy>(&format!(
            "INSERT INTO vacancies (company_id, title, description, requirements, salary,
                                    contract_type, location)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {VACANCY_COLUMNS}"
        ))
        .bind(company_id)
        .bind(&payload.title)
        .bind(payload.description.as_deref())
        .bind(payload.requirements.as_deref())
        .bind(payload.salary)
        .bind(payload.contract_type.as_deref())
        .bind(payload.location.as_deref())
        .fetch_one(&self.pool)
        .await?;
        Ok(vacancy)
    }

    pub async fn update(&self, id: i64, payload: &UpdateVacancyPayload) -> Result<Vacancy> {
        if let Some(status) = payload.status.as_deref() {
            if status != "open" && status != "closed" {
                return Err(Error::BadRequest(format!(
                    "Estado de vacante inválido: {}",
                    status
                )));
            }
        }
        let vacancy = sqlx::query_as::<_, Vacancy>(&format!(
            "UPDATE vacancies SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                requirements = COALESCE($4, requirements),
                salary = COALESCE($5, salary),
                contract_type = COALESCE($6, contract_type),
                location = COALESCE($7, location),
                status = COALESCE($8, status),
                closes_at = CASE WHEN $8 = 'closed' AND status = 'open' THEN NOW()
                                 ELSE closes_at END
             WHERE id = $1 AND NOT removed
             RETURNING {VACANCY_COLUMNS}"
        ))
        .bind(id)
        .bind(payload.title.as_deref())
        .bind(payload.description.as_deref())
        .bind(payload.requirements.as_deref())
        .bind(payload.salary)
        .bind(payload.contract_type.as_deref())
        .bind(payload.location.as_deref())
        .bind(payload.status.as_deref())
        .fetch_one(&self.pool)
        .await?;
        Ok(vacancy)
    }

    pub async fn soft_delete(&self, id: i64) -> Result<bool> {
        let result =
            sqlx::query("UPDATE vacancies SET removed = TRUE WHERE id = $1 AND NOT removed")
                .bind(id)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn restore(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("UPDATE vacancies SET removed = FALSE WHERE id = $1 AND removed")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

use crate::dto::profile_dto::UpdateCandidatePayload;
use crate::error::Result;
use crate::models::candidate::Candidate;
use sqlx::PgPool;

const CANDIDATE_COLUMNS: &str = "id, user_id, phone, address, education, experience, cv_path";

#[derive(Clone)]
pub struct CandidateRepo {
    pool: PgPool,
}

impl CandidateRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_owner(&self, user_id: i64) -> Result<Option<Candidate>> {
        let candidate = sqlx::query_as::<_, Candidate>(&format!(
            "SELECT {CANDIDATE_COLUMNS} FROM candidates WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(candidate)
    }

    pub async fn update(&self, user_id: i64, payload: &UpdateCandidatePayload) -> Result<Candidate> {
        let candidate = sqlx::query_as::<_, Candidate>(&format!(
            "UPDATE candidates SET
                phone = COALESCE($2, phone),
                address = COALESCE($3, address),
                education = COALESCE($4, education),
                experience = COALESCE($5, experience)
             WHERE user_id = $1
             RETURNING {CANDIDATE_COLUMNS}"
        ))
        .bind(user_id)
        .bind(payload.phone.as_deref())
        .bind(payload.address.as_deref())
        .bind(payload.education.as_deref())
        .bind(payload.experience.as_deref())
        .fetch_one(&self.pool)
        .await?;
        Ok(candidate)
    }

    pub async fn set_cv_path(&self, user_id: i64, path: &str) -> Result<bool> {
        let result = sqlx::query("UPDATE candidates SET cv_path = $2 WHERE user_id = $1")
            .bind(user_id)
            .bind(path)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

//! Cross-entity rules that must not be left half-applied. Every operation
//! here runs inside a single transaction; an error before `commit` rolls
//! the whole thing back.

use crate::dto::auth_dto::RegisterPayload;
use crate::error::{Error, Result};
use crate::models::application::{Application, ApplicationStatus};
use crate::models::company::Company;
use crate::models::user::{Role, User};
use crate::models::vacancy::Vacancy;
use crate::repositories::vacancy_repo::VACANCY_COLUMNS;
use crate::utils::crypto::hash_password;
use sqlx::{PgPool, Row};
use tracing::info;

const FEATURED_TARGET: i64 = 3;

#[derive(Clone)]
pub struct RulesService {
    pool: PgPool,
}

impl RulesService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Registration creates the account and its role profile row together.
    pub async fn register(&self, payload: &RegisterPayload) -> Result<User> {
        let role: Role = payload
            .role
            .parse()
            .map_err(|_| Error::BadRequest(format!("Rol inválido: {}", payload.role)))?;
        if role == Role::Admin {
            return Err(Error::BadRequest(
                "No es posible registrarse como administrador".to_string(),
            ));
        }
        if role == Role::Company && payload.company_name.as_deref().unwrap_or("").is_empty() {
            return Err(Error::BadRequest(
                "El nombre de la empresa es requerido para reclutadores".to_string(),
            ));
        }

        let password_hash = hash_password(&payload.password)
            .map_err(|e| Error::Internal(format!("password hashing failed: {}", e)))?;

        let mut tx = self.pool.begin().await?;

        let taken = sqlx::query("SELECT 1 AS one FROM users WHERE username = $1 OR email = $2")
            .bind(&payload.username)
            .bind(&payload.email)
            .fetch_optional(&mut *tx)
            .await?;
        if taken.is_some() {
            return Err(Error::Conflict(
                "El usuario o email ya está registrado".to_string(),
            ));
        }

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (username, email, password_hash, role)
             VALUES ($1, $2, $3, $4)
             RETURNING id, username, email, password_hash, role, image_path, removed, created_at",
        )
        .bind(&payload.username)
        .bind(&payload.email)
        .bind(&password_hash)
        .bind(role)
        .fetch_one(&mut *tx)
        .await?;

        match role {
            Role::Candidate => {
                sqlx::query("INSERT INTO candidates (user_id) VALUES ($1)")
                    .bind(user.id)
                    .execute(&mut *tx)
                    .await?;
            }
            Role::Company => {
                sqlx::query("INSERT INTO companies (user_id, name) VALUES ($1, $2)")
                    .bind(user.id)
                    .bind(payload.company_name.as_deref().unwrap_or(""))
                    .execute(&mut *tx)
                    .await?;
            }
            Role::Admin => unreachable!("rejected above"),
        }

        tx.commit().await?;
        info!(user_id = user.id, role = ?role, "user registered");
        Ok(user)
    }

    /// Clears every featured flag, marks the 3 most recent open vacancies,
    /// then tops up by salary until 3 are marked or candidates run out.
    /// Idempotent: rerunning without intervening writes yields the same set.
    pub async fn recompute_featured(&self) -> Result<Vec<Vacancy>> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE vacancies SET featured = FALSE WHERE featured")
            .execute(&mut *tx)
            .await?;

        let by_recency = sqlx::query(
            "UPDATE vacancies SET featured = TRUE
             WHERE id IN (
                 SELECT id FROM vacancies
                 WHERE status = 'open' AND NOT removed
                 ORDER BY published_at DESC, id DESC
                 LIMIT $1
             )",
        )
        .bind(FEATURED_TARGET)
        .execute(&mut *tx)
        .await?
        .rows_affected() as i64;

        if by_recency < FEATURED_TARGET {
            sqlx::query(
                "UPDATE vacancies SET featured = TRUE
                 WHERE id IN (
                     SELECT id FROM vacancies
                     WHERE status = 'open' AND NOT removed AND NOT featured
                     ORDER BY salary DESC NULLS LAST, id DESC
                     LIMIT $1
                 )",
            )
            .bind(FEATURED_TARGET - by_recency)
            .execute(&mut *tx)
            .await?;
        }

        let featured = sqlx::query_as::<_, Vacancy>(&format!(
            "SELECT {VACANCY_COLUMNS} FROM vacancies
             WHERE featured
             ORDER BY published_at DESC, id DESC"
        ))
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;
        info!(count = featured.len(), "featured vacancies recomputed");
        Ok(featured)
    }

    /// Creates a PENDING application for the acting user's candidate profile
    /// and bumps the vacancy counter, atomically.
    pub async fn apply(&self, user_id: i64, vacancy_id: i64) -> Result<Application> {
        let mut tx = self.pool.begin().await?;

        let actor = sqlx::query("SELECT role FROM users WHERE id = $1 AND NOT removed")
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?;
        let role: Option<Role> = actor.map(|row| row.try_get("role")).transpose()?;
        if role != Some(Role::Candidate) {
            return Err(Error::Forbidden(
                "Solo los candidatos pueden postularse".to_string(),
            ));
        }

        let candidate = sqlx::query("SELECT id FROM candidates WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| {
                Error::Forbidden("Perfil de candidato no encontrado".to_string())
            })?;
        let candidate_id: i64 = candidate.try_get("id")?;

        // Row lock so a concurrent close or a racing duplicate serializes here.
        let vacancy = sqlx::query(
            "SELECT status FROM vacancies WHERE id = $1 AND NOT removed FOR UPDATE",
        )
        .bind(vacancy_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| Error::NotFound("Vacante no encontrada".to_string()))?;
        let status: String = vacancy.try_get("status")?;
        if status == "closed" {
            return Err(Error::Conflict("La vacante está cerrada".to_string()));
        }

        let duplicate = sqlx::query(
            "SELECT 1 AS one FROM applications WHERE candidate_id = $1 AND vacancy_id = $2",
        )
        .bind(candidate_id)
        .bind(vacancy_id)
        .fetch_optional(&mut *tx)
        .await?;
        if duplicate.is_some() {
            return Err(Error::Conflict(
                "Ya te has postulado a esta vacante".to_string(),
            ));
        }

        let application = sqlx::query_as::<_, Application>(
            "INSERT INTO applications (candidate_id, vacancy_id)
             VALUES ($1, $2)
             RETURNING id, candidate_id, vacancy_id, applied_at, status",
        )
        .bind(candidate_id)
        .bind(vacancy_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE vacancies SET applications_count = applications_count + 1 WHERE id = $1",
        )
        .bind(vacancy_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        info!(candidate_id, vacancy_id, "application created");
        Ok(application)
    }

    /// Status transition; ACCEPTED also closes the parent vacancy. Accepting
    /// an already-accepted application is a no-op so the closes-at stamp is
    /// set exactly once.
    pub async fn set_status(
        &self,
        application_id: i64,
        new_status: ApplicationStatus,
    ) -> Result<Application> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, Application>(
            "SELECT id, candidate_id, vacancy_id, applied_at, status
             FROM applications WHERE id = $1 FOR UPDATE",
        )
        .bind(application_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| Error::NotFound("Postulación no encontrada".to_string()))?;

        if current.status == ApplicationStatus::Accepted
            && new_status == ApplicationStatus::Accepted
        {
            tx.commit().await?;
            return Ok(current);
        }

        let application = sqlx::query_as::<_, Application>(
            "UPDATE applications SET status = $2 WHERE id = $1
             RETURNING id, candidate_id, vacancy_id, applied_at, status",
        )
        .bind(application_id)
        .bind(new_status)
        .fetch_one(&mut *tx)
        .await?;

        if new_status == ApplicationStatus::Accepted {
            sqlx::query(
                "UPDATE vacancies
                 SET status = 'closed', closes_at = COALESCE(closes_at, NOW())
                 WHERE id = $1",
            )
            .bind(application.vacancy_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        info!(application_id, status = ?new_status, "application status changed");
        Ok(application)
    }

    /// Swaps the role profile row: delete the old one, insert a blank new
    /// one, same transaction. Admins carry no profile row.
    pub async fn change_role(&self, user_id: i64, new_role: Role) -> Result<User> {
        let mut tx = self.pool.begin().await?;

        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, role, image_path, removed, created_at
             FROM users WHERE id = $1 AND NOT removed FOR UPDATE",
        )
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| Error::NotFound("Usuario no encontrado".to_string()))?;

        if user.role == new_role {
            tx.commit().await?;
            return Ok(user);
        }

        let updated = sqlx::query_as::<_, User>(
            "UPDATE users SET role = $2 WHERE id = $1
             RETURNING id, username, email, password_hash, role, image_path, removed, created_at",
        )
        .bind(user_id)
        .bind(new_role)
        .fetch_one(&mut *tx)
        .await?;

        match user.role {
            Role::Candidate => {
                sqlx::query("DELETE FROM candidates WHERE user_id = $1")
                    .bind(user_id)
                    .execute(&mut *tx)
                    .await?;
            }
            Role::Company => {
                sqlx::query("DELETE FROM companies WHERE user_id = $1")
                    .bind(user_id)
                    .execute(&mut *tx)
                    .await?;
            }
            Role::Admin => {}
        }

        match new_role {
            Role::Candidate => {
                sqlx::query("INSERT INTO candidates (user_id) VALUES ($1)")
                    .bind(user_id)
                    .execute(&mut *tx)
                    .await?;
            }
            Role::Company => {
                sqlx::query("INSERT INTO companies (user_id, name) VALUES ($1, $2)")
                    .bind(user_id)
                    .bind(format!("Empresa de {}", updated.username))
                    .execute(&mut *tx)
                    .await?;
            }
            Role::Admin => {}
        }

        tx.commit().await?;
        info!(user_id, from = ?user.role, to = ?new_role, "user role changed");
        Ok(updated)
    }

    /// Company lookup by owning user. Auto-provisions a default-named row on
    /// first read for a company account. Historical quirk of the original
    /// backend: a read with a write side effect, kept for compatibility.
    pub async fn company_for_user(&self, user_id: i64) -> Result<Company> {
        let mut tx = self.pool.begin().await?;

        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, role, image_path, removed, created_at
             FROM users WHERE id = $1 AND NOT removed",
        )
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| Error::NotFound("Usuario no encontrado".to_string()))?;

        if user.role != Role::Company {
            return Err(Error::Forbidden(
                "El usuario no es una cuenta de empresa".to_string(),
            ));
        }

        sqlx::query(
            "INSERT INTO companies (user_id, name) VALUES ($1, $2)
             ON CONFLICT (user_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(format!("Empresa de {}", user.username))
        .execute(&mut *tx)
        .await?;

        let company = sqlx::query_as::<_, Company>(
            "SELECT id, user_id, name, tax_id, address, phone, description
             FROM companies WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(company)
    }
}

use crate::error::Result;
use crate::models::user::User;
use sqlx::PgPool;

const USER_COLUMNS: &str =
    "id, username, email, password_hash, role, image_path, removed, created_at";

#[derive(Clone)]
pub struct UserRepo {
    pool: PgPool,
}

impl UserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Non-removed user by id. Admin paths that need removed rows go through
    /// `list` with the include-removed flag.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND NOT removed"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn list(&self, include_removed: bool) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users
             WHERE ($1 OR NOT removed)
             ORDER BY id"
        ))
        .bind(include_removed)
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    pub async fn update(
        &self,
        id: i64,
        username: Option<&str>,
        email: Option<&str>,
        password_hash: Option<&str>,
    ) -> Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET
                username = COALESCE($2, username),
                email = COALESCE($3, email),
                password_hash = COALESCE($4, password_hash)
             WHERE id = $1 AND NOT removed
             RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn set_image_path(&self, id: i64, path: &str) -> Result<()> {
        sqlx::query("UPDATE users SET image_path = $2 WHERE id = $1")
            .bind(id)
            .bind(path)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn soft_delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("UPDATE users SET removed = TRUE WHERE id = $1 AND NOT removed")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn restore(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("UPDATE users SET removed = FALSE WHERE id = $1 AND removed")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

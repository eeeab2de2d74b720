use crate::config::TwoFactorMode;
use crate::error::{Error, Result};
use crate::models::user::User;
use crate::utils::crypto::verify_password;
use rand::Rng;
use sqlx::{PgPool, Row};
use tracing::info;

const USER_COLUMNS: &str =
    "id, username, email, password_hash, role, image_path, removed, created_at";

/// Single error for both unknown identifier and wrong password, so login
/// responses cannot be used to enumerate accounts.
const INVALID_CREDENTIALS: &str = "Credenciales inválidas";

#[derive(Clone)]
pub struct AuthService {
    pool: PgPool,
    mode: TwoFactorMode,
}

impl AuthService {
    pub fn new(pool: PgPool, mode: TwoFactorMode) -> Self {
        Self { pool, mode }
    }

    /// Step 1: credential check plus one-time code issuance. The code has no
    /// expiry and is returned to the caller (simulated delivery).
    pub async fn authenticate(&self, identifier: &str, password: &str) -> Result<(User, String)> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users
             WHERE (username = $1 OR email = $1) AND NOT removed"
        ))
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

        let ok = verify_password(password, &user.password_hash)
            .map_err(|e| Error::Internal(format!("password verification failed: {}", e)))?;
        if !ok {
            return Err(Error::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let code = generate_code();
        sqlx::query(
            "INSERT INTO two_factor_codes (user_id, code)
             VALUES ($1, $2)
             ON CONFLICT (user_id) DO UPDATE SET code = EXCLUDED.code, issued_at = NOW()",
        )
        .bind(user.id)
        .bind(&code)
        .execute(&self.pool)
        .await?;

        info!(user_id = user.id, "two-factor code issued");
        Ok((user, code))
    }

    /// Step 2. Permissive mode accepts any well-formed 6-digit code (the
    /// behavior the original shipped with); verifying mode checks the issued
    /// code and consumes it.
    pub async fn verify_second_factor(&self, user_id: i64, code: &str) -> Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND NOT removed"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

        if !code_is_well_formed(code) {
            return Err(Error::Unauthorized("Código inválido".to_string()));
        }

        if self.mode == TwoFactorMode::Verifying {
            let issued =
                sqlx::query("SELECT code FROM two_factor_codes WHERE user_id = $1")
                    .bind(user_id)
                    .fetch_optional(&self.pool)
                    .await?
                    .ok_or_else(|| Error::Unauthorized("Código inválido".to_string()))?;
            let issued_code: String = issued.try_get("code")?;
            if issued_code != code {
                return Err(Error::Unauthorized("Código inválido".to_string()));
            }
            sqlx::query("DELETE FROM two_factor_codes WHERE user_id = $1")
                .bind(user_id)
                .execute(&self.pool)
                .await?;
        }

        info!(user_id, "second factor accepted");
        Ok(user)
    }
}

fn generate_code() -> String {
    format!("{:06}", rand::thread_rng().gen_range(0..1_000_000))
}

fn code_is_well_formed(code: &str) -> bool {
    code.len() == 6 && code.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_codes_are_six_digits() {
        for _ in 0..64 {
            let code = generate_code();
            assert!(code_is_well_formed(&code), "bad code: {}", code);
        }
    }

    #[test]
    fn well_formed_check_is_strict() {
        assert!(code_is_well_formed("000123"));
        assert!(!code_is_well_formed("12345"));
        assert!(!code_is_well_formed("1234567"));
        assert!(!code_is_well_formed("12a456"));
        assert!(!code_is_well_formed(" 12345"));
    }
}

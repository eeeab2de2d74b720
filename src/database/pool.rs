use crate::config::get_config;
use crate::error::Result;
use sqlx::{postgres::PgPoolOptions, PgPool};

/// Builds the process-wide connection pool. `test_before_acquire` discards
/// dead connections before handing them out; acquiring past the ceiling
/// times out and surfaces as `ResourceExhausted`.
pub async fn create_pool() -> Result<PgPool> {
    let config = get_config();
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(std::time::Duration::from_secs(config.db_acquire_timeout_secs))
        .test_before_acquire(true)
        .connect(&config.database_url)
        .await?;
    Ok(pool)
}

use sqlx::{postgres::PgPoolOptions, PgPool, Row};
use uuid::Uuid;

use bolsa_backend::error::Error;
use bolsa_backend::models::application::ApplicationStatus;
use bolsa_backend::models::user::Role;
use bolsa_backend::services::rules_service::RulesService;

async fn seed_user(pool: &PgPool, role: &str, tag: &str) -> i64 {
    let row = sqlx::query(
        "INSERT INTO users (username, email, password_hash, role)
         VALUES ($1, $2, 'x', $3)
         RETURNING id",
    )
    .bind(format!("{}_{}", role, tag))
    .bind(format!("{}_{}@example.com", role, tag))
    .bind(role)
    .fetch_one(pool)
    .await
    .expect("seed user");
    row.get("id")
}

async fn seed_company(pool: &PgPool, user_id: i64) -> i64 {
    let row = sqlx::query(
        "INSERT INTO companies (user_id, name) VALUES ($1, 'Empresa Test') RETURNING id",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
    .expect("seed company");
    row.get("id")
}

async fn seed_vacancy(pool: &PgPool, company_id: i64, title: &str, salary: i64) -> i64 {
    sqlx::query(
        "INSERT INTO vacancies (company_id, title, salary) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(company_id)
    .bind(title)
    .bind(rust_decimal::Decimal::from(salary))
    .fetch_one(pool)
    .await
    .expect("seed vacancy")
    .get("id")
}

async fn featured_ids(pool: &PgPool) -> Vec<i64> {
    sqlx::query("SELECT id FROM vacancies WHERE featured ORDER BY id")
        .fetch_all(pool)
        .await
        .expect("featured ids")
        .into_iter()
        .map(|row| row.get("id"))
        .collect()
}

#[tokio::test]
async fn domain_rules_end_to_end() {
    dotenvy::dotenv().ok();
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set; skipping store-backed test");
        return;
    };

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .expect("pool");
    sqlx::migrate!("./migrations").run(&pool).await.expect("migrations");

    let tag = Uuid::new_v4().simple().to_string();
    let rules = RulesService::new(pool.clone());

    let company_user = seed_user(&pool, "company", &tag).await;
    let company_id = seed_company(&pool, company_user).await;
    let candidate_user = seed_user(&pool, "candidate", &tag).await;
    sqlx::query("INSERT INTO candidates (user_id) VALUES ($1)")
        .bind(candidate_user)
        .execute(&pool)
        .await
        .expect("seed candidate");

    let v1 = seed_vacancy(&pool, company_id, "Backend", 30_000).await;
    let v2 = seed_vacancy(&pool, company_id, "Frontend", 45_000).await;
    seed_vacancy(&pool, company_id, "Data", 60_000).await;
    seed_vacancy(&pool, company_id, "QA", 25_000).await;

    // Applying twice leaves exactly one row and a counter of one.
    let application = rules
        .apply(candidate_user, v1)
        .await
        .expect("first application");
    assert_eq!(application.status, ApplicationStatus::Pending);

    let err = rules.apply(candidate_user, v1).await.unwrap_err();
    assert!(matches!(err, Error::Conflict(_)));
    assert_eq!(err.to_string(), "Ya te has postulado a esta vacante");

    let row = sqlx::query(
        "SELECT COUNT(*) AS n FROM applications WHERE candidate_id = (
             SELECT id FROM candidates WHERE user_id = $1
         ) AND vacancy_id = $2",
    )
    .bind(candidate_user)
    .bind(v1)
    .fetch_one(&pool)
    .await
    .expect("pair count");
    assert_eq!(row.get::<i64, _>("n"), 1);

    let row = sqlx::query("SELECT applications_count FROM vacancies WHERE id = $1")
        .bind(v1)
        .fetch_one(&pool)
        .await
        .expect("counter");
    assert_eq!(row.get::<i32, _>("applications_count"), 1);

    // Featured recomputation: at most 3, only open rows, and rerunning with
    // no intervening writes picks the same set.
    let first = rules.recompute_featured().await.expect("first recompute");
    assert!(first.len() <= 3);
    let first_ids = featured_ids(&pool).await;
    let open_featured = sqlx::query(
        "SELECT COUNT(*) AS n FROM vacancies WHERE featured AND (status <> 'open' OR removed)",
    )
    .fetch_one(&pool)
    .await
    .expect("featured sanity");
    assert_eq!(open_featured.get::<i64, _>("n"), 0);

    rules.recompute_featured().await.expect("second recompute");
    assert_eq!(featured_ids(&pool).await, first_ids);

    // Accepting closes the parent vacancy exactly once; a second accept is a
    // no-op and does not move the closes-at stamp.
    let accepted = rules
        .set_status(application.id, ApplicationStatus::Accepted)
        .await
        .expect("accept");
    assert_eq!(accepted.status, ApplicationStatus::Accepted);

    let row = sqlx::query("SELECT status, closes_at FROM vacancies WHERE id = $1")
        .bind(v1)
        .fetch_one(&pool)
        .await
        .expect("closed vacancy");
    assert_eq!(row.get::<String, _>("status"), "closed");
    let closes_at: chrono::DateTime<chrono::Utc> = row.get("closes_at");

    rules
        .set_status(application.id, ApplicationStatus::Accepted)
        .await
        .expect("re-accept is a no-op");
    let row = sqlx::query("SELECT closes_at FROM vacancies WHERE id = $1")
        .bind(v1)
        .fetch_one(&pool)
        .await
        .expect("closed vacancy unchanged");
    assert_eq!(row.get::<chrono::DateTime<chrono::Utc>, _>("closes_at"), closes_at);

    // The vacancy is now closed, so a fresh application is a conflict.
    let late_user = seed_user(&pool, "candidate", &format!("late_{}", tag)).await;
    sqlx::query("INSERT INTO candidates (user_id) VALUES ($1)")
        .bind(late_user)
        .execute(&pool)
        .await
        .expect("seed late candidate");
    let err = rules.apply(late_user, v1).await.unwrap_err();
    assert!(matches!(err, Error::Conflict(_)));

    // Role change swaps the profile row atomically: the company row is gone
    // and exactly one blank candidate row exists. A dedicated account so the
    // cascade does not take the seeded vacancies with it.
    let flip_user = seed_user(&pool, "company", &format!("flip_{}", tag)).await;
    seed_company(&pool, flip_user).await;
    let migrated = rules
        .change_role(flip_user, Role::Candidate)
        .await
        .expect("role change");
    assert_eq!(migrated.role, Role::Candidate);

    let row = sqlx::query("SELECT COUNT(*) AS n FROM companies WHERE user_id = $1")
        .bind(flip_user)
        .fetch_one(&pool)
        .await
        .expect("company rows");
    assert_eq!(row.get::<i64, _>("n"), 0);

    let row = sqlx::query(
        "SELECT COUNT(*) AS n FROM candidates WHERE user_id = $1 AND phone IS NULL AND cv_path IS NULL",
    )
    .bind(flip_user)
    .fetch_one(&pool)
    .await
    .expect("candidate rows");
    assert_eq!(row.get::<i64, _>("n"), 1);

    // v2 untouched by all of the above.
    let row = sqlx::query("SELECT status FROM vacancies WHERE id = $1")
        .bind(v2)
        .fetch_one(&pool)
        .await
        .expect("v2");
    assert_eq!(row.get::<String, _>("status"), "open");
}

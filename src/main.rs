use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};
use bolsa_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    middleware::admin::require_admin,
    routes, AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(pool);

    let base_routes = Router::new().route("/health", get(routes::health::health));

    let public_api = Router::new()
        .route("/api/register", post(routes::auth::register))
        .route("/api/login", post(routes::auth::login))
        .route("/api/verify-2fa", post(routes::auth::verify_two_factor))
        .route(
            "/api/vacantes",
            get(routes::vacancies::list_open).post(routes::vacancies::create),
        )
        .route(
            "/api/vacantes/:id",
            get(routes::vacancies::get_by_id)
                .put(routes::vacancies::update)
                .delete(routes::vacancies::soft_delete),
        )
        .route(
            "/api/vacantes/:id/postulaciones",
            get(routes::applications::list_for_vacancy),
        )
        .route(
            "/api/empresa/:user_id/vacantes",
            get(routes::vacancies::list_for_company),
        )
        .route(
            "/api/actualizar-destacadas",
            post(routes::vacancies::recompute_featured),
        )
        .route("/api/postulaciones", post(routes::applications::create))
        .route(
            "/api/postulaciones/:id",
            put(routes::applications::set_status),
        )
        .route(
            "/api/candidato/:user_id/postulaciones",
            get(routes::applications::list_for_candidate),
        )
        .route(
            "/api/usuarios/:id",
            get(routes::users::get_by_id).put(routes::users::update),
        )
        .route(
            "/api/candidato/profile/:user_id",
            get(routes::profiles::get_candidate).put(routes::profiles::update_candidate),
        )
        .route(
            "/api/empresa/profile/:user_id",
            get(routes::profiles::get_company).put(routes::profiles::update_company),
        )
        .route("/api/empresas", get(routes::profiles::list_companies))
        .route(
            "/api/usuario/upload-image/:id",
            post(routes::uploads::upload_image),
        )
        .route(
            "/api/candidato/upload-cv/:id",
            post(routes::uploads::upload_cv),
        );

    let admin_api = Router::new()
        .route("/api/admin/usuarios", get(routes::admin::list_users))
        .route(
            "/api/admin/usuarios/:id",
            delete(routes::admin::soft_delete_user),
        )
        .route(
            "/api/admin/usuarios/:id/restore",
            post(routes::admin::restore_user),
        )
        .route(
            "/api/admin/usuarios/:id/role",
            put(routes::admin::change_role),
        )
        .route("/api/admin/vacantes", get(routes::admin::list_vacancies))
        .route(
            "/api/admin/vacantes/:id",
            delete(routes::admin::soft_delete_vacancy),
        )
        .route(
            "/api/admin/vacantes/:id/restore",
            post(routes::admin::restore_vacancy),
        )
        .layer(axum::middleware::from_fn_with_state(
            app_state.clone(),
            require_admin,
        ));

    info!("Serving uploads from: {}", config.uploads_dir);

    let app = base_routes
        .merge(public_api)
        .merge(admin_api)
        .nest_service(
            "/uploads",
            tower_http::services::ServeDir::new(&config.uploads_dir),
        )
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024));

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

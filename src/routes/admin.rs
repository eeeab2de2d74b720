use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::user_dto::{AdminListQuery, ChangeRolePayload, UserResponse},
    error::{Error, Result},
    models::user::Role,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/admin/usuarios",
    params(("include_removed" = bool, Query, description = "Also list soft-deleted accounts")),
    responses((status = 200, description = "All users, removed ones on request"))
)]
#[axum::debug_handler]
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<AdminListQuery>,
) -> Result<impl IntoResponse> {
    let users = state.users.list(query.include_removed).await?;
    let users: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(Json(users))
}

#[utoipa::path(
    delete,
    path = "/api/admin/usuarios/{id}",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User soft-deleted"),
        (status = 404, description = "Missing or already removed user")
    )
)]
#[axum::debug_handler]
pub async fn soft_delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    if !state.users.soft_delete(id).await? {
        return Err(Error::NotFound("Usuario no encontrado".to_string()));
    }
    Ok(Json(serde_json::json!({ "message": "Usuario eliminado" })))
}

#[utoipa::path(
    post,
    path = "/api/admin/usuarios/{id}/restore",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User restored"),
        (status = 404, description = "No removed user with that id")
    )
)]
#[axum::debug_handler]
pub async fn restore_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    if !state.users.restore(id).await? {
        return Err(Error::NotFound("Usuario no encontrado".to_string()));
    }
    Ok(Json(serde_json::json!({ "message": "Usuario restaurado" })))
}

#[utoipa::path(
    put,
    path = "/api/admin/usuarios/{id}/role",
    params(("id" = i64, Path, description = "User ID")),
    request_body = ChangeRolePayload,
    responses(
        (status = 200, description = "Role changed; profile row migrated atomically"),
        (status = 400, description = "Unknown role"),
        (status = 404, description = "Missing or removed user")
    )
)]
#[axum::debug_handler]
pub async fn change_role(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ChangeRolePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let role: Role = payload
        .role
        .parse()
        .map_err(|_| Error::BadRequest(format!("Rol inválido: {}", payload.role)))?;
    let user = state.rules.change_role(id, role).await?;
    Ok(Json(UserResponse::from(user)))
}

#[utoipa::path(
    get,
    path = "/api/admin/vacantes",
    params(("include_removed" = bool, Query, description = "Also list soft-deleted vacancies")),
    responses((status = 200, description = "All vacancies, removed ones on request"))
)]
#[axum::debug_handler]
pub async fn list_vacancies(
    State(state): State<AppState>,
    Query(query): Query<AdminListQuery>,
) -> Result<impl IntoResponse> {
    let vacancies = state.vacancies.list(query.include_removed).await?;
    Ok(Json(vacancies))
}

#[utoipa::path(
    delete,
    path = "/api/admin/vacantes/{id}",
    params(("id" = i64, Path, description = "Vacancy ID")),
    responses(
        (status = 200, description = "Vacancy soft-deleted"),
        (status = 404, description = "Missing or already removed vacancy")
    )
)]
#[axum::debug_handler]
pub async fn soft_delete_vacancy(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    if !state.vacancies.soft_delete(id).await? {
        return Err(Error::NotFound("Vacante no encontrada".to_string()));
    }
    Ok(Json(serde_json::json!({ "message": "Vacante eliminada" })))
}

#[utoipa::path(
    post,
    path = "/api/admin/vacantes/{id}/restore",
    params(("id" = i64, Path, description = "Vacancy ID")),
    responses(
        (status = 200, description = "Vacancy restored"),
        (status = 404, description = "No removed vacancy with that id")
    )
)]
#[axum::debug_handler]
pub async fn restore_vacancy(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    if !state.vacancies.restore(id).await? {
        return Err(Error::NotFound("Vacante no encontrada".to_string()));
    }
    Ok(Json(serde_json::json!({ "message": "Vacante restaurada" })))
}

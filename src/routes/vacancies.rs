use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::vacancy_dto::{CreateVacancyPayload, UpdateVacancyPayload},
    error::{Error, Result},
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/vacantes",
    responses(
        (status = 200, description = "Open, non-removed vacancies; featured first")
    )
)]
#[axum::debug_handler]
pub async fn list_open(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let vacancies = state.vacancies.list_open().await?;
    Ok(Json(vacancies))
}

#[utoipa::path(
    get,
    path = "/api/vacantes/{id}",
    params(("id" = i64, Path, description = "Vacancy ID")),
    responses(
        (status = 200, description = "Vacancy found"),
        (status = 404, description = "Missing or removed vacancy")
    )
)]
#[axum::debug_handler]
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let vacancy = state
        .vacancies
        .find_by_id(id)
        .await?
        .ok_or_else(|| Error::NotFound("Vacante no encontrada".to_string()))?;
    Ok(Json(vacancy))
}

#[utoipa::path(
    post,
    path = "/api/vacantes",
    request_body = CreateVacancyPayload,
    responses(
        (status = 201, description = "Vacancy published"),
        (status = 403, description = "Acting user is not a company account")
    )
)]
#[axum::debug_handler]
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateVacancyPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    // Resolves (and if needed provisions) the company owned by the acting user.
    let company = state.rules.company_for_user(payload.user_id).await?;
    let vacancy = state.vacancies.insert(company.id, &payload).await?;
    Ok((StatusCode::CREATED, Json(vacancy)))
}

#[utoipa::path(
    put,
    path = "/api/vacantes/{id}",
    params(("id" = i64, Path, description = "Vacancy ID")),
    request_body = UpdateVacancyPayload,
    responses(
        (status = 200, description = "Vacancy updated"),
        (status = 404, description = "Missing or removed vacancy")
    )
)]
#[axum::debug_handler]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateVacancyPayload>,
) -> Result<impl IntoResponse> {
    // No ownership check: like the original backend, any caller may edit a
    // vacancy. Only the frontend scopes this to the owning company.
    payload.validate()?;
    let vacancy = state.vacancies.update(id, &payload).await?;
    Ok(Json(vacancy))
}

#[utoipa::path(
    delete,
    path = "/api/vacantes/{id}",
    params(("id" = i64, Path, description = "Vacancy ID")),
    responses(
        (status = 200, description = "Vacancy soft-deleted"),
        (status = 404, description = "Missing or already removed vacancy")
    )
)]
#[axum::debug_handler]
pub async fn soft_delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    // Same as `update`: no ownership check, matching the original backend.
    if !state.vacancies.soft_delete(id).await? {
        return Err(Error::NotFound("Vacante no encontrada".to_string()));
    }
    Ok(Json(serde_json::json!({ "message": "Vacante eliminada" })))
}

#[utoipa::path(
    get,
    path = "/api/empresa/{user_id}/vacantes",
    params(("user_id" = i64, Path, description = "Owning company user ID")),
    responses(
        (status = 200, description = "Company's non-removed vacancies")
    )
)]
#[axum::debug_handler]
pub async fn list_for_company(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse> {
    let company = state.rules.company_for_user(user_id).await?;
    let vacancies = state.vacancies.find_by_owner(company.id).await?;
    Ok(Json(vacancies))
}

#[utoipa::path(
    post,
    path = "/api/actualizar-destacadas",
    responses(
        (status = 200, description = "Featured set recomputed; at most 3 open vacancies")
    )
)]
#[axum::debug_handler]
pub async fn recompute_featured(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let featured = state.rules.recompute_featured().await?;
    Ok(Json(featured))
}

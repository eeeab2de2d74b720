use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::application_dto::{CreateApplicationPayload, UpdateApplicationPayload},
    error::{Error, Result},
    models::application::ApplicationStatus,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/postulaciones",
    request_body = CreateApplicationPayload,
    responses(
        (status = 201, description = "Application created as pending"),
        (status = 400, description = "Closed vacancy or duplicate application"),
        (status = 403, description = "Acting user is not a candidate"),
        (status = 404, description = "Vacancy missing or removed")
    )
)]
#[axum::debug_handler]
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateApplicationPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let application = state
        .rules
        .apply(payload.user_id, payload.vacancy_id)
        .await?;
    Ok((StatusCode::CREATED, Json(application)))
}

#[utoipa::path(
    put,
    path = "/api/postulaciones/{id}",
    params(("id" = i64, Path, description = "Application ID")),
    request_body = UpdateApplicationPayload,
    responses(
        (status = 200, description = "Status changed; accepting closes the vacancy"),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateApplicationPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let status: ApplicationStatus = payload
        .status
        .parse()
        .map_err(|_| Error::BadRequest(format!("Estado inválido: {}", payload.status)))?;
    let application = state.rules.set_status(id, status).await?;
    Ok(Json(application))
}

#[utoipa::path(
    get,
    path = "/api/candidato/{user_id}/postulaciones",
    params(("user_id" = i64, Path, description = "Candidate's user ID")),
    responses(
        (status = 200, description = "Candidate's applications with their vacancies"),
        (status = 404, description = "Candidate profile not found")
    )
)]
#[axum::debug_handler]
pub async fn list_for_candidate(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse> {
    let candidate = state
        .candidates
        .find_by_owner(user_id)
        .await?
        .ok_or_else(|| Error::NotFound("Perfil de candidato no encontrado".to_string()))?;
    let applications = state.applications.find_by_owner(candidate.id).await?;
    Ok(Json(applications))
}

#[utoipa::path(
    get,
    path = "/api/vacantes/{id}/postulaciones",
    params(("id" = i64, Path, description = "Vacancy ID")),
    responses(
        (status = 200, description = "Applications received on the vacancy"),
        (status = 404, description = "Vacancy missing or removed")
    )
)]
#[axum::debug_handler]
pub async fn list_for_vacancy(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state
        .vacancies
        .find_by_id(id)
        .await?
        .ok_or_else(|| Error::NotFound("Vacante no encontrada".to_string()))?;
    let applications = state.applications.find_by_vacancy(id).await?;
    Ok(Json(applications))
}

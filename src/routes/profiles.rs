use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::profile_dto::{UpdateCandidatePayload, UpdateCompanyPayload},
    error::{Error, Result},
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/candidato/profile/{user_id}",
    params(("user_id" = i64, Path, description = "Owning user ID")),
    responses(
        (status = 200, description = "Candidate profile"),
        (status = 404, description = "Profile not found")
    )
)]
#[axum::debug_handler]
pub async fn get_candidate(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse> {
    let candidate = state
        .candidates
        .find_by_owner(user_id)
        .await?
        .ok_or_else(|| Error::NotFound("Perfil de candidato no encontrado".to_string()))?;
    Ok(Json(candidate))
}

#[utoipa::path(
    put,
    path = "/api/candidato/profile/{user_id}",
    params(("user_id" = i64, Path, description = "Owning user ID")),
    request_body = UpdateCandidatePayload,
    responses(
        (status = 200, description = "Profile updated"),
        (status = 404, description = "Profile not found")
    )
)]
#[axum::debug_handler]
pub async fn update_candidate(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(payload): Json<UpdateCandidatePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let candidate = state.candidates.update(user_id, &payload).await?;
    Ok(Json(candidate))
}

#[utoipa::path(
    get,
    path = "/api/empresa/profile/{user_id}",
    params(("user_id" = i64, Path, description = "Owning user ID")),
    responses(
        (status = 200, description = "Company profile, provisioned on first read"),
        (status = 403, description = "Not a company account"),
        (status = 404, description = "Missing or removed user")
    )
)]
#[axum::debug_handler]
pub async fn get_company(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse> {
    let company = state.rules.company_for_user(user_id).await?;
    Ok(Json(company))
}

#[utoipa::path(
    put,
    path = "/api/empresa/profile/{user_id}",
    params(("user_id" = i64, Path, description = "Owning user ID")),
    request_body = UpdateCompanyPayload,
    responses(
        (status = 200, description = "Profile updated"),
        (status = 404, description = "Profile not found")
    )
)]
#[axum::debug_handler]
pub async fn update_company(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(payload): Json<UpdateCompanyPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let company = state.companies.update(user_id, &payload).await?;
    Ok(Json(company))
}

#[utoipa::path(
    get,
    path = "/api/empresas",
    responses(
        (status = 200, description = "Companies whose accounts are not removed")
    )
)]
#[axum::debug_handler]
pub async fn list_companies(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let companies = state.companies.list().await?;
    Ok(Json(companies))
}

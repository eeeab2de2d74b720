use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::user_dto::{UpdateUserPayload, UserResponse},
    error::{Error, Result},
    utils::crypto::hash_password,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/usuarios/{id}",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found"),
        (status = 404, description = "Missing or removed user")
    )
)]
#[axum::debug_handler]
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| Error::NotFound("Usuario no encontrado".to_string()))?;
    Ok(Json(UserResponse::from(user)))
}

#[utoipa::path(
    put,
    path = "/api/usuarios/{id}",
    params(("id" = i64, Path, description = "User ID")),
    request_body = UpdateUserPayload,
    responses(
        (status = 200, description = "Account fields updated"),
        (status = 400, description = "Duplicate username/email"),
        (status = 404, description = "Missing or removed user")
    )
)]
#[axum::debug_handler]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateUserPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let password_hash = match payload.password.as_deref() {
        Some(plain) => Some(
            hash_password(plain)
                .map_err(|e| Error::Internal(format!("password hashing failed: {}", e)))?,
        ),
        None => None,
    };
    let user = state
        .users
        .update(
            id,
            payload.username.as_deref(),
            payload.email.as_deref(),
            password_hash.as_deref(),
        )
        .await?;
    Ok(Json(UserResponse::from(user)))
}

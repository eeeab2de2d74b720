use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::auth_dto::{
        AuthenticatedUserResponse, LoginPayload, LoginResponse, RegisterPayload, RegisterResponse,
        VerifyTwoFactorPayload,
    },
    error::Result,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterPayload,
    responses(
        (status = 201, description = "Account and role profile created"),
        (status = 400, description = "Missing field or duplicate username/email")
    )
)]
#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user = state.rules.register(&payload).await?;
    Ok((StatusCode::CREATED, Json(RegisterResponse { id: user.id })))
}

#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Credentials accepted, 2FA code issued"),
        (status = 401, description = "Invalid credentials")
    )
)]
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let (user, code) = state
        .auth
        .authenticate(&payload.identifier, &payload.password)
        .await?;
    Ok(Json(LoginResponse {
        user_id: user.id,
        code,
        message: "Código de verificación enviado".to_string(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/verify-2fa",
    request_body = VerifyTwoFactorPayload,
    responses(
        (status = 200, description = "Second factor accepted"),
        (status = 401, description = "Invalid code or unknown user")
    )
)]
#[axum::debug_handler]
pub async fn verify_two_factor(
    State(state): State<AppState>,
    Json(payload): Json<VerifyTwoFactorPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user = state
        .auth
        .verify_second_factor(payload.user_id, &payload.code)
        .await?;
    Ok(Json(AuthenticatedUserResponse::from(user)))
}

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::models::user::Role;
use crate::AppState;

/// Gate for /api/admin routes. The acting user id arrives in `X-User-Id`
/// and is resolved against the store on every request; there are no
/// sessions or tokens in this backend.
pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let Some(header) = req.headers().get("x-user-id") else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Falta la cabecera X-User-Id"})),
        )
            .into_response();
    };
    let Some(user_id) = header.to_str().ok().and_then(|v| v.parse::<i64>().ok()) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Cabecera X-User-Id inválida"})),
        )
            .into_response();
    };

    match state.users.find_by_id(user_id).await {
        Ok(Some(user)) if user.role == Role::Admin => next.run(req).await,
        Ok(_) => (
            StatusCode::FORBIDDEN,
            Json(json!({"error": "Se requiere rol de administrador"})),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}

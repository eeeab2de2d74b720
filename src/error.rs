use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    /// Uniqueness or state-transition violation. Served as 400, which is what
    /// the frontend expects for duplicate applications and registrations.
    #[error("{0}")]
    Conflict(String),

    /// Connection pool ceiling reached.
    #[error("Servicio saturado, intenta de nuevo más tarde")]
    ResourceExhausted,

    /// Store unreachable. No retry: the caller gets a 5xx immediately.
    #[error("Error de conexión con la base de datos: {0}")]
    Connection(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Multipart error: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let (status, error_message) = match self {
            Error::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Error::Conflict(msg) => (StatusCode::BAD_REQUEST, msg),
            Error::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            Error::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Error::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            Error::ResourceExhausted => (
                StatusCode::SERVICE_UNAVAILABLE,
                Error::ResourceExhausted.to_string(),
            ),
            Error::Connection(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            Error::Database(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            Error::Json(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            Error::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            Error::Io(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            Error::Multipart(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            Error::Anyhow(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            Error::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Error::NotFound("Recurso no encontrado".to_string()),
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => Error::ResourceExhausted,
            sqlx::Error::Io(e) => Error::Connection(e.to_string()),
            sqlx::Error::Tls(e) => Error::Connection(e.to_string()),
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Error::Conflict("El registro ya existe".to_string())
            }
            other => Error::Database(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_the_contract() {
        let cases = [
            (Error::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (Error::Conflict("x".into()), StatusCode::BAD_REQUEST),
            (Error::Unauthorized("x".into()), StatusCode::UNAUTHORIZED),
            (Error::Forbidden("x".into()), StatusCode::FORBIDDEN),
            (Error::NotFound("x".into()), StatusCode::NOT_FOUND),
            (Error::ResourceExhausted, StatusCode::SERVICE_UNAVAILABLE),
            (
                Error::Connection("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                Error::Internal("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn row_not_found_maps_to_not_found() {
        let err: Error = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn pool_timeout_maps_to_resource_exhausted() {
        let err: Error = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, Error::ResourceExhausted));
    }
}

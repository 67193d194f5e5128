use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Ошибка HTTP-слоя. Любой ответ с ошибкой имеет вид `{ "error": "..." }`
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error(transparent)]
    Internal(anyhow::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Сообщение для клиента. Детали внутренних ошибок остаются в логе
    pub fn public_message(&self) -> String {
        match self {
            AppError::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }
}

/// Сервисы возвращают `anyhow::Result`; типизированная ошибка внутри достаётся обратно
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<AppError>() {
            Ok(app) => app,
            Err(other) => AppError::Internal(other),
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        AppError::Internal(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Internal(err) = &self {
            tracing::error!(error = %err, "Internal error");
        }
        let body = json!({ "error": self.public_message() });
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::validation("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Conflict("x".into()).status(), StatusCode::CONFLICT);
        assert_eq!(AppError::Unauthorized("x".into()).status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Forbidden("x".into()).status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_typed_error_survives_anyhow() {
        let err: anyhow::Error = AppError::Conflict("Slug already exists".into()).into();
        let app: AppError = err.into();
        assert_eq!(app.status(), StatusCode::CONFLICT);
        assert_eq!(app.public_message(), "Slug already exists");
    }

    #[test]
    fn test_internal_message_is_hidden() {
        let app: AppError = anyhow::anyhow!("disk I/O error at /var/db").into();
        assert_eq!(app.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(app.public_message(), "An internal error occurred");
    }
}

#[cfg(feature = "ssr")]
use crate::error::AppError;
#[cfg(feature = "ssr")]
use axum::http::StatusCode;
#[cfg(feature = "ssr")]
use axum::response::{IntoResponse, Response};

/// Converts AppError into a JSON `{ "error": ... }` response.
///
/// Validation errors additionally carry the per-field messages under
/// `fields` so the admin forms can highlight them.
#[cfg(feature = "ssr")]
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            AppError::Validation(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Validation failed".to_string(),
            ),
            AppError::Database(msg) => {
                tracing::error!("Database error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Database error: {}", msg),
                )
            }
            AppError::Config(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Configuration error: {}", msg),
            ),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = match &self {
            AppError::Validation(fields) => serde_json::json!({
                "error": message,
                "fields": fields,
            }),
            _ => serde_json::json!({
                "error": message
            }),
        };

        (status, axum::Json(body)).into_response()
    }
}

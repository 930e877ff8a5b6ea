use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use skyway_core::CoreError;

#[derive(Debug)]
pub enum AppError {
    ValidationError(String),
    AuthenticationError(String),
    ConflictError(String),
    /// Upstream failure, shown with the upstream's own message.
    UpstreamError { status: StatusCode, message: String },
}

impl AppError {
    pub fn validation(msg: impl ToString) -> Self {
        AppError::ValidationError(msg.to_string())
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ValidationError(msg) => AppError::ValidationError(msg),
            e @ CoreError::SelectionRejected(_) => AppError::ConflictError(e.to_string()),
            e @ CoreError::InvalidTransition(_) => AppError::ConflictError(e.to_string()),
            CoreError::RemoteFailure { status, message, .. } => {
                // Client errors (bad token, seat lost to another booking, unknown
                // flight) keep their status; everything else is a bad gateway.
                let status = status
                    .and_then(|s| StatusCode::from_u16(s).ok())
                    .filter(StatusCode::is_client_error)
                    .unwrap_or(StatusCode::BAD_GATEWAY);
                AppError::UpstreamError { status, message }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::AuthenticationError(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::ConflictError(msg) => (StatusCode::CONFLICT, msg),
            AppError::UpstreamError { status, message } => {
                if status.is_server_error() {
                    tracing::error!("Upstream error {}: {}", status, message);
                } else {
                    tracing::warn!("Upstream error {}: {}", status, message);
                }
                (status, message)
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use regieleki_domain::DomainError;
use serde_json::json;
use tracing::error;

pub enum ApiError {
    BadRequest(&'static str),
    Unauthorized,
    Domain(DomainError),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message.to_string()),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized".to_string()),
            ApiError::Domain(DomainError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, "record not found".to_string())
            }
            ApiError::Domain(DomainError::InvalidRecord(message)) => {
                (StatusCode::BAD_REQUEST, message)
            }
            ApiError::Domain(DomainError::Persistence(e)) => {
                error!(error = %e, "Failed to save records");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "failed to save".to_string(),
                )
            }
            ApiError::Domain(e) => {
                error!(error = %e, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::{error, warn};

use crate::utils::response::error as error_response;
use crate::utils::validation::FieldErrors;

pub const NOT_FOUND_DETAIL: &str = "Not found.";
pub const SERVER_ERROR_DETAIL: &str = "A server error occurred.";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error")]
    ValidationError(FieldErrors),

    #[error("Malformed request: {0}")]
    BadRequest(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Database error")]
    DatabaseError(#[from] sqlx::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn log(&self) {
        match self {
            AppError::ValidationError(errors) => {
                let fields: Vec<&str> = errors.fields().collect();
                warn!(?fields, "Validation failed");
            }
            AppError::BadRequest(msg) | AppError::NotFound(msg) => {
                warn!(error = %self, message = %msg, "Request rejected");
            }
            AppError::DatabaseError(e) => {
                error!(error = ?e, "Database error");
            }
        }
    }
}

impl From<FieldErrors> for AppError {
    fn from(errors: FieldErrors) -> Self {
        AppError::ValidationError(errors)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        self.log();

        match self {
            // Field errors are the body itself
            AppError::ValidationError(errors) => (status, Json(errors)).into_response(),
            AppError::BadRequest(msg) => error_response(msg, status),
            AppError::NotFound(_) => error_response(NOT_FOUND_DETAIL, status),
            // Do not expose internal details in the API response
            AppError::DatabaseError(_) => error_response(SERVER_ERROR_DETAIL, status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::ValidationError(FieldErrors::new()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotFound("event".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::DatabaseError(sqlx::Error::PoolTimedOut).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_database_error_hides_details() {
        let response = AppError::DatabaseError(sqlx::Error::PoolClosed).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

use crate::services::ServiceError;
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::fmt;

/// Error returned by every HTTP handler, rendered as
/// `{"error": ..., "description": ...}`.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
    pub description: Option<String>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

impl AppError {
    /// Create a new AppError with a specific status and message.
    pub fn new(status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            status,
            message: msg.into(),
            description: None,
        }
    }

    /// 400 for a payload that failed validation.
    pub fn not_valid(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..Self::new(StatusCode::BAD_REQUEST, "not valid")
        }
    }

    /// Shortcut for a 500 Internal Server Error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, msg)
    }

    /// Shortcut for 404 Not Found
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, msg)
    }

    /// Replace the message of a 404, leaving every other error as is.
    pub fn with_not_found_message(self, msg: impl Into<String>) -> Self {
        if self.status == StatusCode::NOT_FOUND {
            Self::not_found(msg)
        } else {
            self
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.description {
            Some(description) => write!(f, "{}: {}", self.message, description),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: &self.message,
            description: self.description.as_deref(),
        });

        (self.status, body).into_response()
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(err) => AppError::not_valid(err.message),
            ServiceError::UserExists(_) => {
                AppError::new(StatusCode::BAD_REQUEST, "This user already exists")
            }
            ServiceError::UserNotFound(_) | ServiceError::AdvertisementNotFound(_) => {
                AppError::not_found("not found")
            }
            ServiceError::OwnerNotFound(_) => AppError::not_found("This owner does not exist"),
            ServiceError::Sqlx(err) => {
                tracing::error!(error = %err, "storage failure");
                AppError::internal("SQL error")
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::not_valid(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(_: PathRejection) -> Self {
        AppError::not_found("not found")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationError;

    #[test]
    fn service_errors_map_to_statuses() {
        let cases = [
            (
                ServiceError::Validation(ValidationError::new("bad")),
                StatusCode::BAD_REQUEST,
                "not valid",
            ),
            (
                ServiceError::UserExists("alice".into()),
                StatusCode::BAD_REQUEST,
                "This user already exists",
            ),
            (ServiceError::UserNotFound(1), StatusCode::NOT_FOUND, "not found"),
            (
                ServiceError::OwnerNotFound(1),
                StatusCode::NOT_FOUND,
                "This owner does not exist",
            ),
            (
                ServiceError::Sqlx(sqlx::Error::PoolTimedOut),
                StatusCode::INTERNAL_SERVER_ERROR,
                "SQL error",
            ),
        ];

        for (err, status, message) in cases {
            let app_err = AppError::from(err);
            assert_eq!(app_err.status, status);
            assert_eq!(app_err.message, message);
        }
    }

    #[test]
    fn validation_error_keeps_description() {
        let err = AppError::from(ServiceError::Validation(ValidationError::new(
            "'name' is a required property",
        )));
        assert_eq!(
            err.description.as_deref(),
            Some("'name' is a required property")
        );
        assert_eq!(err.to_string(), "not valid: 'name' is a required property");
    }

    #[test]
    fn storage_detail_is_not_exposed() {
        let err = AppError::from(ServiceError::Sqlx(sqlx::Error::RowNotFound));
        assert_eq!(err.description, None);
        assert_eq!(err.message, "SQL error");
    }
}

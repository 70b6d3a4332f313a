//! HTTP error mapping for the REST API.

use api_shared::{ErrorRes, FieldErrorRes};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use labtrack_core::TestError;

/// Errors a REST handler can return.
///
/// Client errors carry a specific message; store and runtime failures are logged and answered
/// with a generic 500 body.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Test(#[from] TestError),
    #[error("invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Test(TestError::Validation(_))
            | ApiError::Test(TestError::InvalidId(_))
            | ApiError::Test(TestError::InvalidInput(_))
            | ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Test(TestError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Test(TestError::Store(_)) | ApiError::Join(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Test(TestError::Validation(errors)) => ErrorRes {
                error: "Validation failed".into(),
                details: errors
                    .into_iter()
                    .map(|e| FieldErrorRes {
                        field: e.field.to_string(),
                        message: e.message,
                    })
                    .collect(),
            },
            ApiError::Test(TestError::InvalidId(e)) => {
                tracing::debug!("rejected test ID: {}", e);
                ErrorRes::new("Invalid test ID")
            }
            ApiError::Test(TestError::InvalidInput(msg)) => ErrorRes::new(msg),
            ApiError::Test(TestError::NotFound(_)) => ErrorRes::new("Test result not found"),
            ApiError::InvalidBody(rejection) => {
                tracing::debug!("rejected request body: {}", rejection);
                ErrorRes::new(format!("Invalid request body: {}", rejection.body_text()))
            }
            ApiError::MethodNotAllowed => ErrorRes::new("Method not allowed"),
            err @ (ApiError::Test(TestError::Store(_)) | ApiError::Join(_)) => {
                tracing::error!("Internal error: {:?}", err);
                ErrorRes::new("Internal error")
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labtrack_core::{DbError, FieldError, TestId, UuidError};

    #[test]
    fn test_status_mapping() {
        let validation = ApiError::from(TestError::Validation(vec![FieldError::new(
            "testDate",
            "Invalid date format",
        )]));
        let invalid_id = ApiError::from(TestError::InvalidId(UuidError::InvalidInput(
            "x".into(),
        )));
        let not_found = ApiError::from(TestError::NotFound(TestId::new()));
        let store = ApiError::from(TestError::Store(DbError::CorruptRow {
            id: "x".into(),
            reason: "bad".into(),
        }));

        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);
        assert_eq!(invalid_id.status(), StatusCode::BAD_REQUEST);
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
        assert_eq!(store.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            ApiError::MethodNotAllowed.status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
    }
}

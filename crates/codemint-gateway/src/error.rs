use crate::model::ErrorResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use codemint_core::{IssueError, StoreError};

pub type Result<T> = std::result::Result<T, AppError>;

/// Error type returned by gateway handlers.
///
/// Translates the issuer's error taxonomy into transport-level failures:
/// invalid input is the caller's fault, everything else is a 5xx.
pub struct AppError(IssueError);

impl From<IssueError> for AppError {
    fn from(err: IssueError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            IssueError::InvalidCode(_) => StatusCode::BAD_REQUEST,
            IssueError::Store(StoreError::Unavailable(_) | StoreError::Timeout(_)) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            IssueError::Exhausted { .. } | IssueError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(ErrorResponse {
            error: self.0.to_string(),
        });

        (status, body).into_response()
    }
}

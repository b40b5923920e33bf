use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use services::{DashboardError, HabitLogServiceError, HabitServiceError};
use storage::repository::StorageError;

/// Error rendered as the API's `{success: false, error}` envelope.
///
/// Service errors are classified here and nowhere else: validation and
/// name conflicts become 400, an unknown habit 404, storage failures
/// 500. Raw storage errors go to the log, never to the client.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "success": false, "error": self.message }));
        (self.status, body).into_response()
    }
}

fn from_storage(e: StorageError) -> ApiError {
    match e {
        StorageError::NotFound => ApiError::new(StatusCode::NOT_FOUND, "habit not found"),
        StorageError::Conflict => ApiError::bad_request("habit name already exists"),
        other => {
            tracing::error!("storage failure: {other}");
            ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "storage failure")
        }
    }
}

impl From<HabitServiceError> for ApiError {
    fn from(err: HabitServiceError) -> Self {
        match err {
            HabitServiceError::Habit(e) => ApiError::bad_request(e.to_string()),
            e @ HabitServiceError::DuplicateName { .. } => ApiError::bad_request(e.to_string()),
            HabitServiceError::Storage(e) => from_storage(e),
            other => {
                tracing::error!("unhandled habit service error: {other}");
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
            }
        }
    }
}

impl From<HabitLogServiceError> for ApiError {
    fn from(err: HabitLogServiceError) -> Self {
        match err {
            e @ HabitLogServiceError::InvalidDay { .. } => ApiError::bad_request(e.to_string()),
            HabitLogServiceError::Storage(e) => from_storage(e),
            other => {
                tracing::error!("unhandled habit log service error: {other}");
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
            }
        }
    }
}

impl From<DashboardError> for ApiError {
    fn from(err: DashboardError) -> Self {
        match err {
            DashboardError::Storage(e) => from_storage(e),
            other => {
                tracing::error!("unhandled dashboard error: {other}");
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

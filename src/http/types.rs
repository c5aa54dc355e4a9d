use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::application::summary::SummaryError;
use crate::domain::{error::TodoError, todo::Todo};

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody { pub error: String }

#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryFailureBody { pub success: bool, pub message: String }

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedBody { pub success: bool, pub deleted_todo: Todo }

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HealthEnvironment {
    pub gemini_configured: bool,
    pub slack_configured: bool,
    pub todo_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthBody {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub environment: HealthEnvironment,
}

/// Every failure leaving a handler goes through here.
#[derive(Debug)]
pub enum ApiError {
    Todo(TodoError),
    BadRequest(String),
    Summary(SummaryError),
}

impl From<TodoError> for ApiError {
    fn from(e: TodoError) -> Self { ApiError::Todo(e) }
}

impl From<SummaryError> for ApiError {
    fn from(e: SummaryError) -> Self { ApiError::Summary(e) }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self { ApiError::BadRequest(e.body_text()) }
}

impl From<PathRejection> for ApiError {
    fn from(_: PathRejection) -> Self { ApiError::BadRequest("Invalid todo id".into()) }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Todo(TodoError::Validation(message)) | ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(ErrorBody { error: message })).into_response()
            }
            ApiError::Todo(TodoError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, Json(ErrorBody { error: "Todo not found".into() })).into_response()
            }
            ApiError::Todo(TodoError::Storage(e)) => {
                tracing::error!(error = %e, "todo storage failure");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody { error: INTERNAL_ERROR_MESSAGE.into() })).into_response()
            }
            ApiError::Summary(e) => {
                let status = if e.is_client_error() {
                    tracing::warn!(error = %e, "summary rejected");
                    StatusCode::BAD_REQUEST
                } else {
                    tracing::error!(error = %e, "summary failed");
                    StatusCode::INTERNAL_SERVER_ERROR
                };
                (status, Json(SummaryFailureBody { success: false, message: e.user_message().into() })).into_response()
            }
        }
    }
}

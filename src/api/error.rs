use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use crate::service::ActionError;
use crate::validation::ValidationError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Please connect your wallet first")]
    NotConnected,

    #[error("{0}")]
    Submission(String),

    #[error("A refresh is already in progress")]
    RefreshInProgress,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::NotConnected => (StatusCode::PRECONDITION_FAILED, self.to_string()),
            ApiError::Submission(_) => (StatusCode::BAD_GATEWAY, self.to_string()),
            ApiError::RefreshInProgress => (StatusCode::CONFLICT, self.to_string()),
            ApiError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error occurred".to_string()),
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

impl From<ActionError> for ApiError {
    fn from(err: ActionError) -> Self {
        match err {
            ActionError::NotConnected => ApiError::NotConnected,
            ActionError::Validation(e) => ApiError::Validation(e),
            ActionError::Submission(msg) => ApiError::Submission(msg),
        }
    }
}

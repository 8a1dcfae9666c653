use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::errors::{ResearchError, SubmissionError};

/// Error returned by API handlers, rendered as `{"error": "<message>"}`
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Research(#[from] ResearchError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),

    #[error("Failed to render page: {0}")]
    Render(#[from] handlebars::RenderError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Research(err) if err.is_not_found() => StatusCode::NOT_FOUND,
            ApiError::Research(err) if err.is_client_error() => StatusCode::BAD_REQUEST,
            ApiError::Submission(err) if err.is_not_found() => StatusCode::NOT_FOUND,
            ApiError::Submission(err) if err.is_conflict() => StatusCode::CONFLICT,
            ApiError::Submission(err) if err.is_client_error() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

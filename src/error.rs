use axum::Json;
use axum::{
    http::{HeaderValue, StatusCode, header::RETRY_AFTER},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::llm::{CompletionError, ValidateError};
use crate::models::GenerationResponse;

/// Request-level failures. Each renders as `{"hashtags": [], "error": ...}`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("rate limit exceeded, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },
    #[error("upstream format error: {0}")]
    UpstreamFormat(#[from] ValidateError),
    #[error("upstream call error: {0}")]
    UpstreamCall(#[from] CompletionError),
    #[error("unexpected error: {0}")]
    Unknown(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::UpstreamFormat(_) | AppError::UpstreamCall(_) | AppError::Unknown(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Short message shown to the user. Upstream details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::RateLimited { .. } => "Too many requests. Please wait.".to_string(),
            AppError::UpstreamFormat(ValidateError::NotJson(_)) => {
                "Couldn't understand AI response. Please try again.".to_string()
            }
            AppError::UpstreamFormat(ValidateError::MissingHashtags) => {
                "AI returned an invalid format. Try again.".to_string()
            }
            AppError::UpstreamCall(_) | AppError::Unknown(_) => {
                "Something went wrong. Please try again.".to_string()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(GenerationResponse::error(self.user_message()));
        let mut response = (status, body).into_response();

        if let AppError::RateLimited { retry_after_secs } = self {
            if let Ok(value) = HeaderValue::from_str(&retry_after_secs.to_string()) {
                response.headers_mut().insert(RETRY_AFTER, value);
            }
        }

        response
    }
}

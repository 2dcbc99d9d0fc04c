use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Failures a single request can end in
///
/// Every variant is terminal for its request and rendered as a plain-text
/// response; none of them affect the running server.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Content-Type must be application/json")]
    UnsupportedMediaType,

    #[error("Invalid request body")]
    InvalidBody(#[from] serde_json::Error),

    #[error("Short URL not found")]
    NotFound,

    #[error("Stored URL is not a valid redirect target")]
    InvalidTarget,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::InvalidTarget => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::InvalidBody(e) => tracing::debug!("rejected shorten body: {}", e),
            AppError::InvalidTarget => tracing::error!("{}", self),
            _ => {}
        }

        (self.status(), self.to_string()).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

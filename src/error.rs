use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Invalid turn: {0}")]
    InvalidTurn(String),

    #[error("Invalid prompt: {0}")]
    InvalidPrompt(String),

    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    #[error("Model catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status the error maps to at the service boundary
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidTurn(_) | AppError::InvalidPrompt(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::GenerationFailed(_)
            | AppError::CatalogUnavailable(_)
            | AppError::ExternalApi(_)
            | AppError::HttpClient(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

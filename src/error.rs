use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to connect to DB: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Upload failed: {0}")]
    Storage(String),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("File too large: max {0}MB allowed")]
    FileTooLarge(u64),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Database(e) => {
                tracing::warn!("Database error: {}", e);
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::Storage(msg) => {
                tracing::error!("Storage error: {}", msg);
                StatusCode::BAD_GATEWAY
            }
            AppError::Template(e) => {
                tracing::error!("Template error: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Validation(msg) => {
                tracing::warn!("Validation error: {}", msg);
                StatusCode::BAD_REQUEST
            }
            AppError::FileTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
        };

        // Plain text, like the success reports
        (status, self.to_string()).into_response()
    }
}

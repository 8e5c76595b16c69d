use actix_web::{HttpResponse, http::StatusCode};
use thiserror::Error;

pub type Res<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    // === CONVERSION ERRORS ===
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("JWT error: {0}")]
    JWT(#[from] jsonwebtoken::errors::Error),

    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    // === APPLICATION ERRORS ===
    #[error("Authorization error: {0}")]
    Unauthorized(String),

    #[error("Payment required: {0}")]
    PaymentRequired(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::PaymentRequired(_) => StatusCode::PAYMENT_REQUIRED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_)
            | AppError::JWT(_)
            | AppError::Reqwest(_)
            | AppError::Config(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_http_response(&self) -> HttpResponse {
        match self {
            // === CONVERSION ERRORS ===
            AppError::Database(error) => log::error!("Database error: {}", error),
            AppError::JWT(error) => log::error!("JWT error: {}", error),
            AppError::Reqwest(error) => log::error!("Reqwest error: {}", error),
            AppError::Config(error) => log::error!("Configuration error: {}", error),
            AppError::Internal(error) => log::error!("Internal error: {}", error),

            // === APPLICATION ERRORS ===
            _ => {}
        }

        // unexpected failures carry their raw message, same as client errors
        HttpResponse::build(self.status()).json(serde_json::json!({ "error": self.to_string() }))
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        self.to_http_response()
    }
}

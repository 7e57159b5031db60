use async_graphql::ErrorExtensions;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("User with this email already exists")]
    DuplicateUser,

    #[error("User not found")]
    UserNotFound,

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Malformed model response: {0}")]
    MalformedResponse(String),

    /// Opaque failure surfaced for any error inside the recommendation pipeline
    #[error("Failed to fetch podcasts")]
    RecommendationFailure,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable machine-readable code exposed to GraphQL clients
    pub fn code(&self) -> &'static str {
        match self {
            AppError::DuplicateUser => "DUPLICATE_USER",
            AppError::UserNotFound => "USER_NOT_FOUND",
            AppError::RecommendationFailure => "RECOMMENDATION_FAILURE",
            AppError::InvalidInput(_) => "INVALID_INPUT",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Inference(_)
            | AppError::MalformedResponse(_)
            | AppError::Database(_)
            | AppError::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::UserNotFound => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::DuplicateUser => (StatusCode::CONFLICT, self.to_string()),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::RecommendationFailure => (StatusCode::BAD_GATEWAY, self.to_string()),
            AppError::Inference(msg) | AppError::MalformedResponse(msg) => {
                (StatusCode::BAD_GATEWAY, msg)
            }
            AppError::Database(_) | AppError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

impl ErrorExtensions for AppError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| e.set("code", self.code()))
    }
}

pub type AppResult<T> = Result<T, AppError>;

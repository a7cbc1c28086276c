//! Application error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;
use userhub_core::auth::AuthError;

use crate::models::ErrorResponse;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("access token missing")]
    TokenMissing,

    #[error("refresh token missing")]
    RefreshTokenMissing,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("invalid access token")]
    InvalidToken,

    #[error("refresh token is invalid")]
    RefreshTokenInvalid,

    #[error("user not found")]
    UserNotFound,

    #[error("user is inactive")]
    UserInactive,

    #[error("internal server error")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match &self {
            AppError::Validation(m) => (StatusCode::BAD_REQUEST, "validation_error", m.as_str()),
            AppError::TokenMissing => {
                (StatusCode::UNAUTHORIZED, "token_missing", "Access token not found")
            }
            AppError::RefreshTokenMissing => (
                StatusCode::UNAUTHORIZED,
                "refresh_token_missing",
                "Refresh token not found",
            ),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "invalid_credentials",
                "Incorrect email or password",
            ),
            AppError::InvalidToken => {
                (StatusCode::UNAUTHORIZED, "invalid_token", "Access token is invalid")
            }
            AppError::RefreshTokenInvalid => (
                StatusCode::UNAUTHORIZED,
                "refresh_token_invalid",
                "Refresh token is invalid",
            ),
            AppError::UserNotFound => {
                (StatusCode::UNAUTHORIZED, "user_not_found", "User not found")
            }
            AppError::UserInactive => {
                (StatusCode::FORBIDDEN, "user_inactive", "Account is inactive")
            }
            AppError::Internal(m) => {
                error!(detail = %m, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error",
                )
            }
        };
        let body = Json(ErrorResponse {
            error: kind.to_string(),
            message: message.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidCredentials => AppError::InvalidCredentials,
            AuthError::UserInactive => AppError::UserInactive,
            AuthError::UserNotFound => AppError::UserNotFound,
            AuthError::InvalidToken => AppError::InvalidToken,
            AuthError::RefreshTokenInvalid => AppError::RefreshTokenInvalid,
            AuthError::Db(e) => AppError::Internal(e.to_string()),
            AuthError::Internal(m) => AppError::Internal(m),
        }
    }
}

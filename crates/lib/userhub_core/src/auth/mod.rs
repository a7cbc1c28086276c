//! Authentication and session logic.
//!
//! Password verification, JWT issue/verify, the login state machine, and
//! refresh-token rotation, coordinated by [`service::AuthService`].

pub mod jwt;
pub mod password;
pub mod service;
pub mod validation;


use thiserror::Error;

/// Authentication errors surfaced by the session orchestrator.
///
/// The first five are the domain kinds the HTTP layer maps to status
/// codes; the rest are opaque internal failures.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("user is inactive")]
    UserInactive,

    #[error("user not found")]
    UserNotFound,

    #[error("invalid access token")]
    InvalidToken,

    #[error("refresh token is invalid")]
    RefreshTokenInvalid,

    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

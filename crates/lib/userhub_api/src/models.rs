//! API request/response models.

use serde::{Deserialize, Serialize};
use userhub_core::models::User;

/// `POST /auth/login` request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// User fields exposed to clients. The password hash and audit columns
/// never leave the server.
#[derive(Debug, Serialize)]
pub struct UserBody {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub status: bool,
}

impl From<&User> for UserBody {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            status: user.status,
        }
    }
}

/// `POST /auth/login` response body.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: UserBody,
}

/// `GET /auth/profile` response body.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: UserBody,
}

/// `POST /auth/refresh` response body.
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub access_token: String,
}

/// `POST /auth/logout` response body.
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub message: String,
}

/// Error body shared by all failure responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

//! Authentication request handlers.
//!
//! Cookie presence is checked here, before the session orchestrator runs:
//! a missing cookie is `token_missing`/`refresh_token_missing`, distinct
//! from an unknown or expired value.

use axum::Json;
use axum::extract::State;
use axum_extra::extract::cookie::CookieJar;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::models::{LoginRequest, LoginResponse, LogoutResponse, ProfileResponse, RefreshResponse};
use crate::services::cookies;

/// `POST /auth/login` — authenticate with email + password.
pub async fn login_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> AppResult<(CookieJar, Json<LoginResponse>)> {
    validate_login(&body)?;

    let result = state
        .auth
        .login_with_password(&body.email, &body.password)
        .await?;

    let jar = cookies::set_auth_cookies(jar, &result.tokens, state.config.secure_cookies);
    Ok((
        jar,
        Json(LoginResponse {
            access_token: result.tokens.access_token,
            user: (&result.user).into(),
        }),
    ))
}

/// `GET /auth/profile` — resolve the access-token cookie to its user.
pub async fn profile_handler(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<Json<ProfileResponse>> {
    let token = jar
        .get(cookies::ACCESS_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(AppError::TokenMissing)?;

    let user = state.auth.user_from_access_token(&token).await?;
    Ok(Json(ProfileResponse {
        user: (&user).into(),
    }))
}

/// `POST /auth/refresh` — rotate the refresh-token cookie into a new pair.
pub async fn refresh_handler(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Json<RefreshResponse>)> {
    let refresh_token = jar
        .get(cookies::REFRESH_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(AppError::RefreshTokenMissing)?;

    let tokens = state.auth.refresh(&refresh_token).await?;

    let jar = cookies::set_auth_cookies(jar, &tokens, state.config.secure_cookies);
    Ok((
        jar,
        Json(RefreshResponse {
            access_token: tokens.access_token,
        }),
    ))
}

/// `POST /auth/logout` — end this session and clear auth cookies.
/// Succeeds whether or not a matching session exists.
pub async fn logout_handler(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Json<LogoutResponse>)> {
    let refresh_token = jar
        .get(cookies::REFRESH_COOKIE)
        .map(|c| c.value().to_string())
        .unwrap_or_default();

    state.auth.logout(&refresh_token).await?;

    let jar = cookies::clear_auth_cookies(jar, state.config.secure_cookies);
    Ok((
        jar,
        Json(LogoutResponse {
            message: "Logged out".to_string(),
        }),
    ))
}

/// Thin request validation; the schemas proper live with the frontend.
fn validate_login(body: &LoginRequest) -> Result<(), AppError> {
    if body.email.is_empty() || !body.email.contains('@') {
        return Err(AppError::Validation("email is not valid".into()));
    }
    if body.password.is_empty() {
        return Err(AppError::Validation("password must not be empty".into()));
    }
    Ok(())
}

//! Cookie service — set/get/clear auth cookies.
//!
//! On every successful login/refresh the HTTP layer sets an httpOnly
//! access-token cookie, a long-lived httpOnly refresh-token cookie, and a
//! non-httpOnly login-status cookie for UI convenience. Logout clears all
//! three.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;
use userhub_core::models::AuthTokens;

/// Cookie name for the access token.
pub const ACCESS_COOKIE: &str = "access_token";
/// Cookie name for the refresh token.
pub const REFRESH_COOKIE: &str = "refresh_token";
/// Non-httpOnly boolean cookie the frontend reads to know login state.
pub const LOGIN_STATUS_COOKIE: &str = "is_logged_in";

/// Refresh-token cookie lifetime: 1 year.
const REFRESH_COOKIE_MAX_AGE: Duration = Duration::days(365);

fn http_only_cookie(name: &str, value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((name.to_string(), value))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/".to_string())
        .build()
}

/// Add the access/refresh/status cookies for a fresh token pair.
pub fn set_auth_cookies(jar: CookieJar, tokens: &AuthTokens, secure: bool) -> CookieJar {
    // The access cookie is a session cookie; the token carries its own
    // expiry. The refresh cookie outlives it by design.
    let access = http_only_cookie(ACCESS_COOKIE, tokens.access_token.clone(), secure);

    let mut refresh = http_only_cookie(REFRESH_COOKIE, tokens.refresh_token.clone(), secure);
    refresh.set_max_age(REFRESH_COOKIE_MAX_AGE);

    let status = Cookie::build((LOGIN_STATUS_COOKIE.to_string(), "true".to_string()))
        .http_only(false)
        .secure(false)
        .same_site(SameSite::Lax)
        .path("/".to_string())
        .max_age(REFRESH_COOKIE_MAX_AGE)
        .build();

    jar.add(access).add(refresh).add(status)
}

/// Expire all three auth cookies.
pub fn clear_auth_cookies(jar: CookieJar, secure: bool) -> CookieJar {
    let mut access = http_only_cookie(ACCESS_COOKIE, String::new(), secure);
    access.set_max_age(Duration::ZERO);

    let mut refresh = http_only_cookie(REFRESH_COOKIE, String::new(), secure);
    refresh.set_max_age(Duration::ZERO);

    let status = Cookie::build((LOGIN_STATUS_COOKIE.to_string(), "false".to_string()))
        .http_only(false)
        .secure(false)
        .same_site(SameSite::Lax)
        .path("/".to_string())
        .max_age(Duration::ZERO)
        .build();

    jar.add(access).add(refresh).add(status)
}

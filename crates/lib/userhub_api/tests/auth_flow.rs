//! Integration tests — drive the auth routes through the router with
//! in-memory repositories, asserting status codes and cookie behavior.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Request, Response, StatusCode};
use tower::ServiceExt;
use userhub_api::config::ApiConfig;
use userhub_api::{AppState, router};
use userhub_core::auth::password::hash_password;
use userhub_core::auth::service::AuthService;
use userhub_core::models::NewUser;
use userhub_core::repo::UserRepository;
use userhub_core::repo::memory::{MemoryRefreshTokenRepository, MemoryUserRepository};

const SECRET: &str = "integration-test-secret";

async fn app_with_user(email: &str, password: &str, status: bool) -> Router {
    let users = Arc::new(MemoryUserRepository::new());
    let refresh_tokens = Arc::new(MemoryRefreshTokenRepository::new());

    users
        .create(NewUser {
            email: email.to_string(),
            password: hash_password(password).unwrap(),
            name: "Test User".to_string(),
            status,
            google_id: None,
            created_by: 0,
            updated_by: 0,
        })
        .await
        .unwrap();

    let state = AppState {
        auth: AuthService::new(users, refresh_tokens, SECRET.to_string(), 3600),
        config: ApiConfig {
            bind_addr: "127.0.0.1:0".into(),
            jwt_secret: SECRET.into(),
            access_token_ttl_secs: 3600,
            secure_cookies: false,
        },
    };
    router(state)
}

fn login_request(email: &str, password: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/auth/login")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(format!(
            r#"{{"email":"{email}","password":"{password}"}}"#
        )))
        .unwrap()
}

/// Pull `name=value` out of the response's Set-Cookie headers.
fn cookie_value(resp: &Response<Body>, name: &str) -> Option<String> {
    resp.headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .find_map(|raw| {
            let (pair, _) = raw.split_once(';').unwrap_or((raw, ""));
            let (k, v) = pair.split_once('=')?;
            (k == name).then(|| v.to_string())
        })
}

async fn body_json(resp: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse JSON")
}

#[tokio::test]
async fn login_sets_cookies_and_returns_user() {
    let app = app_with_user("a@x.com", "secret123", true).await;

    let resp = app
        .oneshot(login_request("a@x.com", "secret123"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let access = cookie_value(&resp, "access_token").expect("access_token cookie");
    let refresh = cookie_value(&resp, "refresh_token").expect("refresh_token cookie");
    assert!(!access.is_empty());
    assert_eq!(refresh.len(), 128);
    assert_eq!(cookie_value(&resp, "is_logged_in").as_deref(), Some("true"));

    let raw = resp
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .map(|h| h.to_str().unwrap().to_string())
        .collect::<Vec<_>>()
        .join("\n");
    assert!(raw.contains("HttpOnly"));

    let json = body_json(resp).await;
    assert_eq!(json["user"]["email"], "a@x.com");
    assert_eq!(json["user"]["status"], true);
    assert!(json["access_token"].is_string());
}

#[tokio::test]
async fn login_wrong_password_is_401() {
    let app = app_with_user("a@x.com", "secret123", true).await;

    let resp = app.oneshot(login_request("a@x.com", "wrong")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(resp).await["error"], "invalid_credentials");
}

#[tokio::test]
async fn login_inactive_user_is_403() {
    let app = app_with_user("off@x.com", "secret123", false).await;

    let resp = app
        .oneshot(login_request("off@x.com", "secret123"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(resp).await["error"], "user_inactive");
}

#[tokio::test]
async fn login_bad_email_is_400() {
    let app = app_with_user("a@x.com", "secret123", true).await;

    let resp = app
        .oneshot(login_request("not-an-email", "secret123"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["error"], "validation_error");
}

#[tokio::test]
async fn profile_without_cookie_is_token_missing() {
    let app = app_with_user("a@x.com", "secret123", true).await;

    let req = Request::builder()
        .uri("/auth/profile")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(resp).await["error"], "token_missing");
}

#[tokio::test]
async fn profile_with_forged_token_is_invalid_token() {
    let app = app_with_user("a@x.com", "secret123", true).await;

    let req = Request::builder()
        .uri("/auth/profile")
        .header(COOKIE, "access_token=not.a.jwt")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(resp).await["error"], "invalid_token");
}

#[tokio::test]
async fn profile_round_trip_through_cookie() {
    let app = app_with_user("a@x.com", "secret123", true).await;

    let login = app
        .clone()
        .oneshot(login_request("a@x.com", "secret123"))
        .await
        .unwrap();
    let access = cookie_value(&login, "access_token").unwrap();

    let req = Request::builder()
        .uri("/auth/profile")
        .header(COOKIE, format!("access_token={access}"))
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["user"]["email"], "a@x.com");
}

#[tokio::test]
async fn refresh_without_cookie_is_refresh_token_missing() {
    let app = app_with_user("a@x.com", "secret123", true).await;

    let req = Request::builder()
        .method("POST")
        .uri("/auth/refresh")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(resp).await["error"], "refresh_token_missing");
}

#[tokio::test]
async fn refresh_rotates_and_replay_fails() {
    let app = app_with_user("a@x.com", "secret123", true).await;

    let login = app
        .clone()
        .oneshot(login_request("a@x.com", "secret123"))
        .await
        .unwrap();
    let first = cookie_value(&login, "refresh_token").unwrap();

    let refresh_req = |token: &str| {
        Request::builder()
            .method("POST")
            .uri("/auth/refresh")
            .header(COOKIE, format!("refresh_token={token}"))
            .body(Body::empty())
            .unwrap()
    };

    let resp = app.clone().oneshot(refresh_req(&first)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let rotated = cookie_value(&resp, "refresh_token").unwrap();
    assert_ne!(rotated, first);
    assert!(body_json(resp).await["access_token"].is_string());

    // Replaying the consumed token is rejected.
    let resp = app.clone().oneshot(refresh_req(&first)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(resp).await["error"], "refresh_token_invalid");

    // The rotated token still works.
    let resp = app.oneshot(refresh_req(&rotated)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn logout_clears_cookies_and_is_idempotent() {
    let app = app_with_user("a@x.com", "secret123", true).await;

    let login = app
        .clone()
        .oneshot(login_request("a@x.com", "secret123"))
        .await
        .unwrap();
    let refresh = cookie_value(&login, "refresh_token").unwrap();

    let logout_req = |cookie: Option<String>| {
        let mut builder = Request::builder().method("POST").uri("/auth/logout");
        if let Some(c) = cookie {
            builder = builder.header(COOKIE, c);
        }
        builder.body(Body::empty()).unwrap()
    };

    let resp = app
        .clone()
        .oneshot(logout_req(Some(format!("refresh_token={refresh}"))))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(cookie_value(&resp, "access_token").as_deref(), Some(""));
    assert_eq!(cookie_value(&resp, "refresh_token").as_deref(), Some(""));
    assert_eq!(cookie_value(&resp, "is_logged_in").as_deref(), Some("false"));

    // Same token again, and no token at all: still 200.
    let resp = app
        .clone()
        .oneshot(logout_req(Some(format!("refresh_token={refresh}"))))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app.clone().oneshot(logout_req(None)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // The logged-out session cannot refresh.
    let req = Request::builder()
        .method("POST")
        .uri("/auth/refresh")
        .header(COOKIE, format!("refresh_token={refresh}"))
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

//! Session orchestrator.
//!
//! Coordinates the credential verifier, token issuer, and token store to
//! implement the four terminal auth flows: password login, Google-profile
//! login, refresh, and logout.

use std::sync::Arc;

use tracing::debug;

use super::AuthError;
use super::jwt::{generate_access_token, generate_refresh_token_value, resolve_subject};
use super::password::hash_system_password;
use super::validation::{assert_active, assert_exists, verify_login};
use crate::models::auth::{AuthResult, AuthTokens, GoogleProfile};
use crate::models::user::{NewUser, User, UserChanges};
use crate::repo::{RefreshTokenRepository, UserRepository};

/// Actor ID recorded on rows the system creates or updates on its own
/// behalf (Google sign-in, account linking).
const SYSTEM_ACTOR: i64 = 0;

/// Orchestrates login, token refresh, and logout over injected
/// repositories.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    refresh_tokens: Arc<dyn RefreshTokenRepository>,
    jwt_secret: String,
    access_token_ttl_secs: i64,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        refresh_tokens: Arc<dyn RefreshTokenRepository>,
        jwt_secret: String,
        access_token_ttl_secs: i64,
    ) -> Self {
        Self {
            users,
            refresh_tokens,
            jwt_secret,
            access_token_ttl_secs,
        }
    }

    /// Authenticate with email + password.
    pub async fn login_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthResult, AuthError> {
        let user = self.users.find_by_email(email).await?;
        let user = verify_login(user, password)?;
        let tokens = self.issue_tokens(&user).await?;
        debug!(user_id = user.id, "password login");
        Ok(AuthResult { user, tokens })
    }

    /// Authenticate with a Google profile: find by google_id, else link an
    /// existing account by email, else create a new active user.
    pub async fn login_with_google_profile(
        &self,
        profile: &GoogleProfile,
    ) -> Result<AuthResult, AuthError> {
        if let Some(linked) = self.users.find_by_google_id(&profile.id).await? {
            let user = assert_active(linked)?;
            let tokens = self.issue_tokens(&user).await?;
            return Ok(AuthResult { user, tokens });
        }

        if let Some(existing) = self.users.find_by_email(&profile.email).await? {
            let updated = self
                .users
                .update(
                    existing.id,
                    UserChanges {
                        name: Some(profile.name.clone()),
                        google_id: Some(profile.id.clone()),
                        updated_by: SYSTEM_ACTOR,
                        ..UserChanges::default()
                    },
                )
                .await?;
            let user = assert_active(assert_exists(updated)?)?;
            let tokens = self.issue_tokens(&user).await?;
            debug!(user_id = user.id, "linked existing account to google profile");
            return Ok(AuthResult { user, tokens });
        }

        let user = self
            .users
            .create(NewUser {
                email: profile.email.clone(),
                password: hash_system_password()?,
                name: profile.name.clone(),
                status: true,
                google_id: Some(profile.id.clone()),
                created_by: SYSTEM_ACTOR,
                updated_by: SYSTEM_ACTOR,
            })
            .await?;
        let tokens = self.issue_tokens(&user).await?;
        debug!(user_id = user.id, "created user from google profile");
        Ok(AuthResult { user, tokens })
    }

    /// Resolve an access token to its owning user.
    pub async fn user_from_access_token(&self, token: &str) -> Result<User, AuthError> {
        let user_id = resolve_subject(token, self.jwt_secret.as_bytes())?;
        let user = self.users.find_by_id(user_id).await?;
        assert_active(assert_exists(user)?)
    }

    /// Exchange a refresh token for a new token pair (single-use rotation).
    ///
    /// The presented token is consumed atomically before anything else, so
    /// replaying it — including a concurrent duplicate request — fails with
    /// `RefreshTokenInvalid`.
    pub async fn refresh(&self, refresh_token: &str) -> Result<AuthTokens, AuthError> {
        let record = self
            .refresh_tokens
            .consume(refresh_token)
            .await?
            .ok_or(AuthError::RefreshTokenInvalid)?;

        let user = self.users.find_by_id(record.user_id).await?;
        let user = assert_active(assert_exists(user)?)?;

        self.issue_tokens(&user).await
    }

    /// End one session. Best-effort and idempotent: an empty or unknown
    /// token is treated as already logged out. Sibling sessions for the
    /// same user are untouched.
    pub async fn logout(&self, refresh_token: &str) -> Result<(), AuthError> {
        if refresh_token.is_empty() {
            return Ok(());
        }

        if let Some(record) = self.refresh_tokens.find_by_token(refresh_token).await? {
            self.refresh_tokens.delete_by_id(record.id).await?;
            debug!(user_id = record.user_id, "session logged out");
        }

        Ok(())
    }

    /// Revoke every session for a user. Not wired to an endpoint; exposed
    /// as a capability for account deactivation.
    pub async fn revoke_all_sessions(&self, user_id: i64) -> Result<(), AuthError> {
        self.refresh_tokens.delete_all_for_user(user_id).await
    }

    /// Mint a signed access token and a fresh persisted refresh token.
    async fn issue_tokens(&self, user: &User) -> Result<AuthTokens, AuthError> {
        let access_token =
            generate_access_token(user, self.jwt_secret.as_bytes(), self.access_token_ttl_secs)?;

        let refresh_value = generate_refresh_token_value();
        let record = self.refresh_tokens.create(user.id, &refresh_value).await?;

        Ok(AuthTokens {
            access_token,
            refresh_token: record.token,
        })
    }
}

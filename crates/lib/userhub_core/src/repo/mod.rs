//! Repository contracts and implementations.
//!
//! The storage interfaces are capability traits so the session
//! orchestrator can be unit-tested against [`memory`] fakes while the
//! server wires up the [`postgres`] implementations.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::auth::AuthError;
use crate::models::user::{NewUser, RefreshTokenRecord, User, UserChanges};

/// User storage.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;

    async fn find_by_google_id(&self, google_id: &str) -> Result<Option<User>, AuthError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AuthError>;

    async fn create(&self, input: NewUser) -> Result<User, AuthError>;

    /// Apply a partial update. Returns `None` when no such user exists.
    async fn update(&self, id: i64, changes: UserChanges) -> Result<Option<User>, AuthError>;
}

/// Refresh-token storage, keyed by the opaque token value.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    async fn create(&self, user_id: i64, token: &str) -> Result<RefreshTokenRecord, AuthError>;

    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshTokenRecord>, AuthError>;

    /// Atomically delete the row for `token` and return it, or `None` if
    /// it was never stored or already consumed. Backs single-use rotation:
    /// two concurrent refreshes with the same value cannot both succeed.
    async fn consume(&self, token: &str) -> Result<Option<RefreshTokenRecord>, AuthError>;

    async fn delete_by_id(&self, id: i64) -> Result<(), AuthError>;

    /// Delete every session for a user (e.g. on account deactivation).
    async fn delete_all_for_user(&self, user_id: i64) -> Result<(), AuthError>;
}

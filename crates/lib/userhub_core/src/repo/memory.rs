//! In-memory repositories.
//!
//! Mutex-guarded fakes implementing the same contracts as the Postgres
//! repositories, so the auth flows can be exercised without a database.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;

use super::{RefreshTokenRepository, UserRepository};
use crate::auth::AuthError;
use crate::models::user::{NewUser, RefreshTokenRecord, User, UserChanges};

/// In-memory user storage.
#[derive(Default)]
pub struct MemoryUserRepository {
    users: Mutex<HashMap<i64, User>>,
    next_id: AtomicI64,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of stored users.
    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let users = self.users.lock().unwrap();
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_google_id(&self, google_id: &str) -> Result<Option<User>, AuthError> {
        let users = self.users.lock().unwrap();
        Ok(users
            .values()
            .find(|u| u.google_id.as_deref() == Some(google_id))
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AuthError> {
        let users = self.users.lock().unwrap();
        Ok(users.get(&id).cloned())
    }

    async fn create(&self, input: NewUser) -> Result<User, AuthError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let user = User {
            id,
            email: input.email,
            password: input.password,
            name: input.name,
            status: input.status,
            google_id: input.google_id,
            created_by: input.created_by,
            updated_by: input.updated_by,
            created_at: now,
            updated_at: now,
        };
        self.users.lock().unwrap().insert(id, user.clone());
        Ok(user)
    }

    async fn update(&self, id: i64, changes: UserChanges) -> Result<Option<User>, AuthError> {
        let mut users = self.users.lock().unwrap();
        let Some(user) = users.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = changes.name {
            user.name = name;
        }
        if let Some(status) = changes.status {
            user.status = status;
        }
        if let Some(google_id) = changes.google_id {
            user.google_id = Some(google_id);
        }
        if let Some(password) = changes.password {
            user.password = password;
        }
        user.updated_by = changes.updated_by;
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }
}

/// In-memory refresh-token storage, keyed by the token value.
#[derive(Default)]
pub struct MemoryRefreshTokenRepository {
    tokens: Mutex<HashMap<String, RefreshTokenRecord>>,
    next_id: AtomicI64,
}

impl MemoryRefreshTokenRepository {
    pub fn new() -> Self {
        Self {
            tokens: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of live sessions for a user.
    pub fn count_for_user(&self, user_id: i64) -> usize {
        self.tokens
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.user_id == user_id)
            .count()
    }
}

#[async_trait]
impl RefreshTokenRepository for MemoryRefreshTokenRepository {
    async fn create(&self, user_id: i64, token: &str) -> Result<RefreshTokenRecord, AuthError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let record = RefreshTokenRecord {
            id,
            token: token.to_string(),
            user_id,
            created_at: now,
            updated_at: now,
        };
        self.tokens
            .lock()
            .unwrap()
            .insert(token.to_string(), record.clone());
        Ok(record)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshTokenRecord>, AuthError> {
        Ok(self.tokens.lock().unwrap().get(token).cloned())
    }

    async fn consume(&self, token: &str) -> Result<Option<RefreshTokenRecord>, AuthError> {
        // Removal under the lock mirrors the conditional DELETE: the row
        // can only be taken once.
        Ok(self.tokens.lock().unwrap().remove(token))
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), AuthError> {
        self.tokens.lock().unwrap().retain(|_, r| r.id != id);
        Ok(())
    }

    async fn delete_all_for_user(&self, user_id: i64) -> Result<(), AuthError> {
        self.tokens.lock().unwrap().retain(|_, r| r.user_id != user_id);
        Ok(())
    }
}

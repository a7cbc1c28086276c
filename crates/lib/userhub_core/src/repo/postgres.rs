//! PostgreSQL-backed repositories.

use async_trait::async_trait;
use sqlx::PgPool;

use super::{RefreshTokenRepository, UserRepository};
use crate::auth::AuthError;
use crate::models::user::{NewUser, RefreshTokenRecord, User, UserChanges};

const USER_COLUMNS: &str = "id, email, password, name, status, google_id, \
                            created_by, updated_by, created_at, updated_at";

/// User storage over a PostgreSQL pool.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_by_google_id(&self, google_id: &str) -> Result<Option<User>, AuthError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE google_id = $1"
        ))
        .bind(google_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AuthError> {
        let user =
            sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(user)
    }

    async fn create(&self, input: NewUser) -> Result<User, AuthError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (email, password, name, status, google_id, created_by, updated_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&input.email)
        .bind(&input.password)
        .bind(&input.name)
        .bind(input.status)
        .bind(&input.google_id)
        .bind(input.created_by)
        .bind(input.updated_by)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    async fn update(&self, id: i64, changes: UserChanges) -> Result<Option<User>, AuthError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET \
               name = COALESCE($2, name), \
               status = COALESCE($3, status), \
               google_id = COALESCE($4, google_id), \
               password = COALESCE($5, password), \
               updated_by = $6, \
               updated_at = now() \
             WHERE id = $1 \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(&changes.name)
        .bind(changes.status)
        .bind(&changes.google_id)
        .bind(&changes.password)
        .bind(changes.updated_by)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }
}

/// Refresh-token storage over a PostgreSQL pool.
#[derive(Clone)]
pub struct PgRefreshTokenRepository {
    pool: PgPool,
}

impl PgRefreshTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RefreshTokenRepository for PgRefreshTokenRepository {
    async fn create(&self, user_id: i64, token: &str) -> Result<RefreshTokenRecord, AuthError> {
        let record = sqlx::query_as::<_, RefreshTokenRecord>(
            "INSERT INTO refresh_tokens (token, user_id) VALUES ($1, $2) \
             RETURNING id, token, user_id, created_at, updated_at",
        )
        .bind(token)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(record)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshTokenRecord>, AuthError> {
        let record = sqlx::query_as::<_, RefreshTokenRecord>(
            "SELECT id, token, user_id, created_at, updated_at \
             FROM refresh_tokens WHERE token = $1",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }

    async fn consume(&self, token: &str) -> Result<Option<RefreshTokenRecord>, AuthError> {
        // Single conditional delete-and-return: exactly one caller can win.
        let record = sqlx::query_as::<_, RefreshTokenRecord>(
            "DELETE FROM refresh_tokens WHERE token = $1 \
             RETURNING id, token, user_id, created_at, updated_at",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), AuthError> {
        sqlx::query("DELETE FROM refresh_tokens WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_all_for_user(&self, user_id: i64) -> Result<(), AuthError> {
        sqlx::query("DELETE FROM refresh_tokens WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

//! User and refresh-token records as stored in the database.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user row.
///
/// `password` is a bcrypt hash; accounts created from a Google profile get
/// a system-generated placeholder that can never match a typed password.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password: String,
    pub name: String,
    pub status: bool,
    pub google_id: Option<String>,
    pub created_by: i64,
    pub updated_by: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub name: String,
    pub status: bool,
    pub google_id: Option<String>,
    pub created_by: i64,
    pub updated_by: i64,
}

/// Partial update applied to an existing user. `None` fields are left as-is.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub status: Option<bool>,
    pub google_id: Option<String>,
    pub password: Option<String>,
    pub updated_by: i64,
}

/// A refresh token row. One row per logged-in session; deleted on rotation
/// or logout. Carries no expiry — it is valid until explicitly deleted.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RefreshTokenRecord {
    pub id: i64,
    pub token: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

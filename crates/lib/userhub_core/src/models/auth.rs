//! Authentication domain models.

use serde::{Deserialize, Serialize};

use crate::models::user::User;

/// Token pair returned to the caller once on login/refresh. The raw
/// refresh-token value here is the only copy the client ever receives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// Result of a successful login flow.
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub user: User,
    pub tokens: AuthTokens,
}

/// Identity assertion from Google, already verified by the OAuth layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleProfile {
    pub id: String,
    pub email: String,
    pub name: String,
}

/// JWT claims embedded in access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject — user ID rendered as a string (standard JWT `sub` claim).
    pub sub: String,
    /// User email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Account active flag.
    pub status: bool,
    /// Expiry (unix timestamp).
    pub exp: i64,
    /// Issued at (unix timestamp).
    pub iat: i64,
}

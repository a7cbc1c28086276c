//! JWT access token generation and verification.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::Rng;

use super::AuthError;
use crate::models::auth::TokenClaims;
use crate::models::user::User;

/// Generate a signed JWT access token (HS256).
pub fn generate_access_token(
    user: &User,
    secret: &[u8],
    ttl_secs: i64,
) -> Result<String, AuthError> {
    let now = Utc::now();
    let claims = TokenClaims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        name: user.name.clone(),
        status: user.status,
        exp: (now + Duration::seconds(ttl_secs)).timestamp(),
        iat: now.timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| AuthError::Internal(format!("jwt encode: {e}")))
}

/// Verify an access token and extract the subject user ID.
///
/// All failure modes — malformed token, bad signature, expiry, or a `sub`
/// claim that is not a positive integer — collapse to
/// [`AuthError::InvalidToken`] so callers cannot tell which check failed.
pub fn resolve_subject(token: &str, secret: &[u8]) -> Result<i64, AuthError> {
    let key = DecodingKey::from_secret(secret);
    let mut validation = Validation::default();
    validation.validate_exp = true;

    let claims = decode::<TokenClaims>(token, &key, &validation)
        .map_err(|_| AuthError::InvalidToken)?
        .claims;

    match claims.sub.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AuthError::InvalidToken),
    }
}

/// Generate a cryptographically random refresh-token value: 64 bytes
/// (512 bits) hex-encoded.
pub fn generate_refresh_token_value() -> String {
    let mut bytes = [0u8; 64];
    rand::rng().fill(&mut bytes[..]);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

//! Credential and account-state validation.

use super::AuthError;
use super::password::verify_password;
use crate::models::user::User;

/// Validate a password login attempt.
///
/// Check order matters: presence, then active flag, then password — an
/// inactive user with the correct password surfaces `UserInactive`, not
/// `InvalidCredentials`.
pub fn verify_login(user: Option<User>, password: &str) -> Result<User, AuthError> {
    let user = user.ok_or(AuthError::InvalidCredentials)?;
    let user = assert_active(user)?;

    if !verify_password(password, &user.password)? {
        return Err(AuthError::InvalidCredentials);
    }

    Ok(user)
}

/// Fail with `UserInactive` when the account's status flag is false.
pub fn assert_active(user: User) -> Result<User, AuthError> {
    if !user.status {
        return Err(AuthError::UserInactive);
    }
    Ok(user)
}

/// Fail with `UserNotFound` when the user is absent.
pub fn assert_exists(user: Option<User>) -> Result<User, AuthError> {
    user.ok_or(AuthError::UserNotFound)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::auth::password::hash_password;

    fn user_with(password_hash: &str, status: bool) -> User {
        User {
            id: 1,
            email: "a@x.com".into(),
            password: password_hash.into(),
            name: "Alice".into(),
            status,
            google_id: None,
            created_by: 0,
            updated_by: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn absent_user_is_invalid_credentials() {
        let err = verify_login(None, "whatever").unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[test]
    fn inactive_user_beats_password_check() {
        let hash = hash_password("secret123").unwrap();

        // Correct password, inactive account: the active check runs first.
        let err = verify_login(Some(user_with(&hash, false)), "secret123").unwrap_err();
        assert!(matches!(err, AuthError::UserInactive));

        // Wrong password, inactive account: still the active check.
        let err = verify_login(Some(user_with(&hash, false)), "wrong").unwrap_err();
        assert!(matches!(err, AuthError::UserInactive));
    }

    #[test]
    fn wrong_password_is_invalid_credentials() {
        let hash = hash_password("secret123").unwrap();
        let err = verify_login(Some(user_with(&hash, true)), "wrong").unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[test]
    fn correct_password_returns_user() {
        let hash = hash_password("secret123").unwrap();
        let user = verify_login(Some(user_with(&hash, true)), "secret123").unwrap();
        assert_eq!(user.email, "a@x.com");
    }

    #[test]
    fn assert_helpers() {
        let hash = hash_password("x").unwrap();
        assert!(matches!(
            assert_exists(None).unwrap_err(),
            AuthError::UserNotFound
        ));
        assert!(matches!(
            assert_active(user_with(&hash, false)).unwrap_err(),
            AuthError::UserInactive
        ));
        assert!(assert_active(user_with(&hash, true)).is_ok());
    }
}

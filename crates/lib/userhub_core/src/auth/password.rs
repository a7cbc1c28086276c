//! Password hashing via bcrypt.

use rand::Rng;

use super::AuthError;

/// bcrypt cost factor.
const BCRYPT_COST: u32 = 10;

/// Hash a password with bcrypt (cost 10).
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    bcrypt::hash(password, BCRYPT_COST)
        .map_err(|e| AuthError::Internal(format!("bcrypt hash: {e}")))
}

/// Verify a password against a bcrypt hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    bcrypt::verify(password, hash).map_err(|e| AuthError::Internal(format!("bcrypt verify: {e}")))
}

/// Hash of a random value, used as the password for accounts created from
/// a Google profile. Such accounts can never password-login.
pub fn hash_system_password() -> Result<String, AuthError> {
    let mut bytes = [0u8; 32];
    rand::rng().fill(&mut bytes[..]);
    let random: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    hash_password(&random)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let hash = hash_password("secret123").unwrap();
        assert!(verify_password("secret123", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn system_password_is_a_valid_hash() {
        let hash = hash_system_password().unwrap();
        // No plaintext exists for it, so any guess must fail.
        assert!(!verify_password("", &hash).unwrap());
        assert!(!verify_password("password", &hash).unwrap());
    }
}

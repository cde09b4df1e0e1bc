//! # Password hashing — Argon2id
//!
//! The login form sends a plaintext password with every create request. The
//! server stores only an Argon2id PHC string (`$argon2id$v=19$...`) in the
//! `password_hash` column and uses [`verify_password`] to decide whether a
//! create request for an existing name is the same person logging in again.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Failed to hash password: {0}")]
    Hash(argon2::password_hash::Error),
    #[error("Invalid password hash: {0}")]
    Stored(argon2::password_hash::Error),
}

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(PasswordError::Hash)
}

/// Check `password` against a stored PHC string.
pub fn verify_password(password: &str, stored: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(stored).map_err(PasswordError::Stored)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_password("pass1").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("pass1", &hash).unwrap());
        assert!(!verify_password("pass2", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        assert_ne!(hash_password("same").unwrap(), hash_password("same").unwrap());
    }

    #[test]
    fn test_malformed_stored_hash() {
        assert!(matches!(
            verify_password("pass1", "not-a-hash"),
            Err(PasswordError::Stored(_))
        ));
    }
}

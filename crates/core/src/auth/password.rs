//! Secret hashing with Argon2id.
//!
//! Passwords and recovery answers are both stored as PHC strings; plaintext
//! never reaches a store.

use argon2::{
    Argon2, PasswordHash,
    password_hash::{PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;

/// Errors that can occur during hashing operations.
#[derive(Debug, Error)]
pub enum PasswordError {
    /// Failed to hash the secret.
    #[error("failed to hash secret: {0}")]
    HashError(String),

    /// Verification failed for a reason other than a mismatch.
    #[error("failed to verify secret: {0}")]
    VerifyError(String),

    /// Stored hash is not a PHC string.
    #[error("invalid hash format")]
    InvalidHash,
}

/// Hashes a secret (password or normalized recovery answer) using Argon2id.
///
/// # Errors
///
/// Returns `PasswordError::HashError` if hashing fails.
///
/// # Example
///
/// ```
/// use villa_core::auth::hash_secret;
///
/// let hash = hash_secret("my_secure_password").unwrap();
/// assert!(hash.starts_with("$argon2id$"));
/// ```
pub fn hash_secret(secret: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::HashError(e.to_string()))
}

/// Verifies a secret against a stored PHC hash.
///
/// Returns `Ok(false)` on a mismatch; errors are reserved for unusable hashes.
///
/// # Errors
///
/// Returns `PasswordError::InvalidHash` if the hash format is invalid.
/// Returns `PasswordError::VerifyError` if verification fails unexpectedly.
///
/// # Example
///
/// ```
/// use villa_core::auth::{hash_secret, verify_secret};
///
/// let hash = hash_secret("pw1").unwrap();
/// assert!(verify_secret("pw1", &hash).unwrap());
/// assert!(!verify_secret("wrong", &hash).unwrap());
/// ```
pub fn verify_secret(secret: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| PasswordError::InvalidHash)?;

    match Argon2::default().verify_password(secret.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::VerifyError(e.to_string())),
    }
}

/// Canonical form of a recovery answer before hashing or verifying.
///
/// Answers are typed from memory, so surrounding whitespace and letter case
/// are not significant.
#[must_use]
pub fn normalize_answer(answer: &str) -> String {
    answer.trim().to_lowercase()
}

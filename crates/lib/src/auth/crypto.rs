//! Credential hashing for the auth system
//!
//! Passwords are hashed with Argon2id and stored as PHC-format strings
//! (salt embedded). Nothing else about a credential is ever persisted.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core},
};

use super::errors::AuthError;
use crate::Result;

/// Hash a password using Argon2id under a freshly generated salt.
///
/// # Returns
/// The PHC-format hash string, suitable for direct persistence.
pub fn hash_password(password: impl AsRef<str>) -> Result<String> {
    let salt = SaltString::generate(&mut rand_core::OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_ref().as_bytes(), &salt)
        .map_err(|e| AuthError::PasswordHash {
            reason: e.to_string(),
        })?
        .to_string();

    Ok(hash)
}

/// Verify a password against its stored PHC hash string.
///
/// # Returns
/// Ok(()) if the password is correct, Err otherwise.
pub fn verify_password(password: impl AsRef<str>, hash: impl AsRef<str>) -> Result<()> {
    let parsed = PasswordHash::new(hash.as_ref()).map_err(|e| AuthError::PasswordHash {
        reason: e.to_string(),
    })?;

    Argon2::default()
        .verify_password(password.as_ref().as_bytes(), &parsed)
        .map_err(|_| AuthError::InvalidPassword.into())
}

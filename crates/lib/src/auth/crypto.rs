//! Password hashing for the credential store.
//!
//! Uses Argon2id in PHC string format. The salt is generated fresh per hash
//! and travels embedded in the hash string, so the credential file stores a
//! single string per user.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core},
};

use super::errors::AuthError;
use crate::Result;

/// Hash a password using Argon2id
///
/// # Arguments
/// * `password` - The password to hash
///
/// # Returns
/// The Argon2 hash string (PHC format) with a fresh random salt embedded
pub fn hash_password(password: impl AsRef<str>) -> Result<String> {
    let salt = SaltString::generate(&mut rand_core::OsRng);

    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_ref().as_bytes(), &salt)
        .map_err(|e| AuthError::HashingFailed {
            reason: e.to_string(),
        })?
        .to_string();

    Ok(password_hash)
}

/// Verify a password against a stored hash
///
/// Fails closed: a stored hash that does not parse as a PHC string verifies
/// as `false` rather than erroring, so one corrupt credential entry cannot
/// take down sign-in for everyone else.
///
/// # Arguments
/// * `password` - The password to verify
/// * `password_hash` - The stored password hash (PHC format)
pub fn verify_password(password: impl AsRef<str>, password_hash: impl AsRef<str>) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(password_hash.as_ref()) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_ref().as_bytes(), &parsed_hash)
        .is_ok()
}

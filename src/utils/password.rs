//! Credential hashing for user accounts.

use argon2::{Argon2, password_hash::PasswordHasher};

use crate::error::AppResult;

/// Hashes a password with Argon2id and a fresh random salt.
pub fn hash_password(password: &str) -> AppResult<String> {
    let hash = Argon2::default().hash_password(password.as_bytes())?;
    Ok(hash.to_string())
}

/// Hashes a submitted password, passing an empty one through untouched.
///
/// An empty password on an edit form means "keep the stored credential";
/// storage recognises the empty value and leaves the column alone.
pub fn hash_submitted(password: &str) -> AppResult<String> {
    if password.is_empty() {
        return Ok(String::new());
    }
    hash_password(password)
}

//! Secret hashing.
//!
//! Passwords and OTP codes are hashed with Argon2id (fresh random salt,
//! PHC string format) and checked with a constant-time verify. Plaintext
//! secrets are never persisted.
//!
//! Refresh tokens are different: sessions are *looked up* by token value,
//! so their stored form must be deterministic. They use a SHA-256 hex
//! fingerprint; equality is decided by the database lookup itself.

use anyhow::anyhow;
use argon2::password_hash::{
    rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::Argon2;
use sha2::{Digest, Sha256};

use super::errors::AuthError;

/// Hash a secret (password or OTP code) into a salted PHC string.
pub fn hash_secret(plaintext: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let digest = Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(|e| anyhow!("secret hashing failed: {e}"))?;
    Ok(digest.to_string())
}

/// Check a secret against a stored digest in constant time.
///
/// A mismatch is a normal `false`; a malformed digest means the stored
/// row is corrupt and surfaces as an internal error.
pub fn verify_secret(plaintext: &str, digest: &str) -> Result<bool, AuthError> {
    let parsed =
        PasswordHash::new(digest).map_err(|e| anyhow!("malformed secret digest: {e}"))?;
    match Argon2::default().verify_password(plaintext.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(anyhow!("secret verification failed: {e}").into()),
    }
}

/// Deterministic SHA-256 hex fingerprint for refresh-token lookups.
pub fn fingerprint(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    format!("{:x}", hasher.finalize())
}

//! # Password Credentials
//!
//! Argon2id hashing for stored passwords.
//!
//! ```text
//! stored value                        verify_password("password123", stored)
//! ──────────────────────────────────  ──────────────────────────────────────
//! "$argon2id$v=19$m=19456,..."   ──►  Argon2 verification
//! "password123" (legacy row)     ──►  exact comparison, then needs_upgrade
//! ```
//!
//! Databases written by earlier releases kept plaintext passwords. Such rows
//! still log in; the user repository rewrites them as hashes on the first
//! successful login.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::error::{CoreError, CoreResult};

const PHC_PREFIX: &str = "$argon2";

/// Hashes a password into a PHC string with a fresh random salt.
pub fn hash_password(password: &str) -> CoreResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| CoreError::PasswordHash(e.to_string()))
}

/// Returns true when `stored` is a plaintext credential from an older release.
#[inline]
pub fn is_legacy(stored: &str) -> bool {
    !stored.starts_with(PHC_PREFIX)
}

/// Checks `password` against a stored credential.
///
/// A malformed hash never verifies.
pub fn verify_password(password: &str, stored: &str) -> bool {
    if is_legacy(stored) {
        return !stored.is_empty() && stored == password;
    }

    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_password("password123").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(!is_legacy(&hash));
        assert!(verify_password("password123", &hash));
        assert!(!verify_password("password124", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("same").unwrap();
        let b = hash_password("same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_legacy_plaintext() {
        assert!(is_legacy("password123"));
        assert!(verify_password("password123", "password123"));
        assert!(!verify_password("password12", "password123"));
        assert!(!verify_password("", ""));
    }

    #[test]
    fn test_malformed_hash_never_verifies() {
        assert!(!verify_password("x", "$argon2id$garbage"));
    }
}

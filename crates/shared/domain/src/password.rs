//! Password value object - Domain layer password handling.
//!
//! DDD: Encapsulates a stored password hash as a domain value object.
//! Comparison goes through the [`PasswordMatcher`] seam so the hashing scheme
//! stays pluggable; [`Argon2Matcher`] is the default.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::{DomainError, DomainResult};

/// Stored password hash.
///
/// DDD: Value object - immutable, compared by value.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output (security)
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash a plain text password with a fresh salt.
    ///
    /// Used when seeding accounts; the unregistration flow only ever
    /// verifies existing hashes.
    pub fn new(plain_text: &str) -> DomainResult<Self> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| DomainError::password(format!("Password hash failed: {}", e)))?;
        Ok(Self {
            hash: hash.to_string(),
        })
    }

    /// Create a Password from an existing hash (from database).
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for Password {}

/// Compares a supplied plain text password against a stored hash.
///
/// `Ok(false)` is a mismatch. `Err` means the comparison itself could not be
/// carried out (malformed hash, unsupported scheme) and must not be mistaken
/// for a wrong password.
pub trait PasswordMatcher: Send + Sync {
    fn matches(&self, plain_text: &str, stored: &Password) -> DomainResult<bool>;
}

/// Argon2 PHC-string verification. The argon2 crate compares digests in
/// constant time.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Matcher;

impl PasswordMatcher for Argon2Matcher {
    fn matches(&self, plain_text: &str, stored: &Password) -> DomainResult<bool> {
        let parsed = PasswordHash::new(stored.as_str())
            .map_err(|e| DomainError::password(format!("Invalid hash format: {}", e)))?;

        match Argon2::default().verify_password(plain_text.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(DomainError::password(format!("Hash verification failed: {}", e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_and_verify() {
        let password = Password::new("secret").unwrap();

        assert!(Argon2Matcher.matches("secret", &password).unwrap());
        assert!(!Argon2Matcher.matches("wrong", &password).unwrap());
    }

    #[test]
    fn test_password_from_hash() {
        let password = Password::new("TestPassword123").unwrap();
        let restored = Password::from_hash(password.as_str());

        assert_eq!(restored, password);
        assert!(Argon2Matcher.matches("TestPassword123", &restored).unwrap());
    }

    #[test]
    fn test_same_password_different_salts() {
        let pass1 = Password::new("SamePassword123").unwrap();
        let pass2 = Password::new("SamePassword123").unwrap();

        // Different salts produce different hashes
        assert_ne!(pass1.as_str(), pass2.as_str());
        assert!(Argon2Matcher.matches("SamePassword123", &pass1).unwrap());
        assert!(Argon2Matcher.matches("SamePassword123", &pass2).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_an_error_not_a_mismatch() {
        let stored = Password::from_hash("not-a-phc-string");

        let result = Argon2Matcher.matches("anything", &stored);
        assert!(matches!(result, Err(DomainError::Password(_))));
    }

    #[test]
    fn test_debug_redacts_hash() {
        let password = Password::from_hash("$argon2id$v=19$secret");
        let debug = format!("{:?}", password);

        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("secret"));
    }
}

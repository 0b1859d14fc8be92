//! Credential record domain entity.

use chrono::{DateTime, Utc};

use crate::password::Password;

/// Derive the canonical lookup key from a display identity.
///
/// Lower-casing is Unicode-aware and locale-independent, so the same name
/// always maps to the same key regardless of host settings.
pub fn lookup_key(username: &str) -> String {
    username.to_lowercase()
}

/// One registered account as persisted by the credential store.
#[derive(Debug, Clone)]
pub struct CredentialRecord {
    /// Canonical case-insensitive identity (primary key)
    pub lowercase_key: String,
    /// Display name the account was registered with
    pub nickname: String,
    /// Stored hash; `None` marks a passwordless ("cracked") account
    pub password_hash: Option<Password>,
    pub created_at: DateTime<Utc>,
}

impl CredentialRecord {
    /// Create a password-protected record
    pub fn new(nickname: impl Into<String>, password_hash: Password) -> Self {
        Self::build(nickname.into(), Some(password_hash))
    }

    /// Create a record with no stored password
    pub fn passwordless(nickname: impl Into<String>) -> Self {
        Self::build(nickname.into(), None)
    }

    fn build(nickname: String, password_hash: Option<Password>) -> Self {
        Self {
            lowercase_key: lookup_key(&nickname),
            nickname,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

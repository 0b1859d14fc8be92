//! Credential verification service.
//!
//! Turns a lookup key and a supplied password into exactly one
//! [`VerificationOutcome`]. Failures never escape as errors; they become
//! [`VerificationOutcome::Error`] so the caller always gets a terminal answer.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::repository::CredentialRepository;
use common::AppError;
use domain::{Password, PasswordMatcher, VerificationOutcome};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Outcome type produced by the verification service
pub type Verification = VerificationOutcome<AppError>;

/// Credential verification trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(&self, lowercase_key: &str, password: &str) -> Verification;
}

/// Verifies passwords against the credential store.
pub struct PasswordVerifier {
    repository: Arc<dyn CredentialRepository>,
    matcher: Arc<dyn PasswordMatcher>,
}

impl PasswordVerifier {
    pub fn new(repository: Arc<dyn CredentialRepository>, matcher: Arc<dyn PasswordMatcher>) -> Self {
        Self {
            repository,
            matcher,
        }
    }

    /// Hash comparison is CPU bound, so it runs on the blocking pool.
    async fn compare(&self, password: &str, stored: Password) -> Result<bool, AppError> {
        let matcher = self.matcher.clone();
        let password = password.to_string();

        tokio::task::spawn_blocking(move || matcher.matches(&password, &stored))
            .await
            .map_err(|e| AppError::internal(format!("Password comparison task failed: {}", e)))?
            .map_err(AppError::from)
    }
}

#[async_trait]
impl CredentialVerifier for PasswordVerifier {
    async fn verify(&self, lowercase_key: &str, password: &str) -> Verification {
        let record = match self.repository.find_by_key(lowercase_key).await {
            Ok(Some(record)) => record,
            Ok(None) => return VerificationOutcome::NotFound,
            Err(e) => return VerificationOutcome::Error(e),
        };

        let Some(stored) = record.password_hash else {
            debug!(key = %lowercase_key, "Account has no stored password");
            return VerificationOutcome::Passwordless;
        };

        match self.compare(password, stored).await {
            Ok(true) => VerificationOutcome::Verified,
            Ok(false) => VerificationOutcome::WrongPassword,
            Err(e) => VerificationOutcome::Error(e),
        }
    }
}

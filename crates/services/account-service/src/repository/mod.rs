//! Repository layer for credential data access.

pub mod entities;
mod credential_repository;

pub use credential_repository::{CredentialRepository, CredentialStore};

#[cfg(any(test, feature = "test-utils"))]
pub use credential_repository::MockCredentialRepository;

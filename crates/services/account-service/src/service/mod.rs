//! Account service business logic.

mod unregister;
mod verification;

pub use unregister::{UnregisterCommand, UnregisterSettings};
pub use verification::{CredentialVerifier, PasswordVerifier, Verification};

#[cfg(any(test, feature = "test-utils"))]
pub use verification::MockCredentialVerifier;

//! Domain layer - Core account entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! Everything the unregistration flow reasons about lives here: the stored
//! credential record, the password value object, the closed set of
//! verification outcomes and the event fired once an account is removed.

pub mod constants;
pub mod credential;
pub mod error;
pub mod event;
pub mod outcome;
pub mod password;

pub use constants::*;
pub use credential::{lookup_key, CredentialRecord};
pub use error::{DomainError, DomainResult};
pub use event::AccountUnregistered;
pub use outcome::VerificationOutcome;
pub use password::{Argon2Matcher, Password, PasswordMatcher};

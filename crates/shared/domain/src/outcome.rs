//! Result of a single password verification attempt.

/// Exactly one of these is produced per verification attempt.
///
/// `E` carries the infrastructure cause for [`VerificationOutcome::Error`];
/// it is never shown to the user.
#[derive(Debug)]
pub enum VerificationOutcome<E> {
    /// No record exists for the lookup key
    NotFound,
    /// The record has no stored password hash
    Passwordless,
    /// The supplied password does not match
    WrongPassword,
    /// The supplied password matches
    Verified,
    /// Reading or comparing failed
    Error(E),
}

impl<E> VerificationOutcome<E> {
    /// Short label for logs and traces
    pub fn label(&self) -> &'static str {
        match self {
            VerificationOutcome::NotFound => "not_found",
            VerificationOutcome::Passwordless => "passwordless",
            VerificationOutcome::WrongPassword => "wrong_password",
            VerificationOutcome::Verified => "verified",
            VerificationOutcome::Error(_) => "error",
        }
    }
}

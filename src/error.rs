use std::fmt;

/// Outcome of a failed [`crate::Hasher::verify`] call.
///
/// Exactly two recoverable kinds cross the crate boundary. `InvalidHash` may
/// indicate storage corruption or tampering and is worth logging;
/// `PasswordMismatch` is a routine outcome of normal usage.
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// The stored hash does not match the expected grammar. The payload
    /// names the field where parsing or validation failed.
    InvalidHash(&'static str),
    /// The hash is well-formed but the derived bytes differ. Also returned
    /// when the hasher's secret differs from the one used at hash time.
    PasswordMismatch,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidHash(what) => write!(f, "password hash is malformed near {what}"),
            Error::PasswordMismatch => write!(f, "password does not match hash"),
        }
    }
}

impl std::error::Error for Error {}

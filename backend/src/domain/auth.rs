//! Authentication primitives such as login credentials.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use zeroize::Zeroizing;

use crate::domain::{UserValidationError, Username};

/// Domain error returned when credential payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsValidationError {
    /// Username was missing, blank once trimmed, or too long.
    #[error("{0}")]
    Username(#[from] UserValidationError),
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated credentials used by login and signup.
///
/// ## Invariants
/// - `username` satisfies the [`Username`] rules.
/// - `password` is non-empty but keeps caller-provided whitespace so
///   comparisons are never surprising.
///
/// # Examples
/// ```
/// use aqua::domain::Credentials;
///
/// let creds = Credentials::try_from_parts("alice", "pw1").unwrap();
/// assert_eq!(creds.username().as_str(), "alice");
/// assert_eq!(creds.password(), "pw1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    username: Username,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        let username = Username::new(username)?;
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }

        Ok(Self {
            username,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username suitable for credential lookups.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

//! Port for one-way password hashing.

use super::define_port_error;

define_port_error! {
    /// Errors raised while producing a password hash.
    pub enum PasswordHashError {
        /// The hashing backend rejected the input or its parameters.
        Hashing { message: String } => "password hashing failed: {message}",
    }
}

/// Salted one-way hash and verification of plaintext passwords.
///
/// Hashing the same plaintext twice yields different strings because every
/// call draws a fresh salt.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash `plaintext` into a self-describing hash string.
    fn hash(&self, plaintext: &str) -> Result<String, PasswordHashError>;

    /// Whether `plaintext` matches `hash`. Malformed hashes never match.
    fn verify(&self, plaintext: &str, hash: &str) -> bool;
}

//! Port abstraction for the credential store and its errors.
use async_trait::async_trait;

use crate::domain::{UserId, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The username is already registered.
        DuplicateUsername { username: String } => "username '{username}' is already taken",
    }
}

/// Identifier and password hash stored for a username.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredentials {
    pub user_id: UserId,
    pub password_hash: String,
}

/// Username to password-hash mapping with store-enforced uniqueness.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user, failing with `DuplicateUsername` when the name is
    /// taken. Existing rows are never modified.
    async fn create_user(
        &self,
        username: &Username,
        password_hash: &str,
    ) -> Result<UserId, UserPersistenceError>;

    /// Look up the credentials stored for `username`.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError>;
}

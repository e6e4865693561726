//! Account domain service.
//!
//! Implements the signup and login driving ports on top of the credential
//! store and password hasher driven ports.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info};

use crate::domain::ports::{
    LoginService, PasswordHasher, SignupService, UserPersistenceError, UserRepository,
};
use crate::domain::{Credentials, Error, UserId};

const INVALID_CREDENTIALS: &str = "invalid credentials";

fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::DuplicateUsername { username } => {
            Error::conflict(format!("username '{username}' is already taken"))
        }
        UserPersistenceError::Connection { message } => {
            error!(%message, "user repository unavailable");
            Error::internal(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            error!(%message, "user repository query failed");
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

/// Service implementing [`SignupService`] and [`LoginService`].
#[derive(Clone)]
pub struct AccountService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
}

impl<U, H> AccountService<U, H> {
    /// Create a service over a credential store and a password hasher.
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

#[async_trait]
impl<U, H> SignupService for AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn sign_up(&self, credentials: &Credentials) -> Result<UserId, Error> {
        let password_hash = self.hasher.hash(credentials.password()).map_err(|err| {
            error!(error = %err, "password hashing failed");
            Error::internal(err.to_string())
        })?;

        let user_id = self
            .users
            .create_user(credentials.username(), &password_hash)
            .await
            .map_err(map_user_persistence_error)?;

        info!(%user_id, "account created");
        Ok(user_id)
    }
}

#[async_trait]
impl<U, H> LoginService for AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn authenticate(&self, credentials: &Credentials) -> Result<UserId, Error> {
        let stored = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(map_user_persistence_error)?;

        let Some(stored) = stored else {
            debug!(username = %credentials.username(), "login for unknown username");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        if !self
            .hasher
            .verify(credentials.password(), &stored.password_hash)
        {
            debug!(user_id = %stored.user_id, "login with wrong password");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        Ok(stored.user_id)
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;

//! Driving ports for account creation and authentication.
//!
//! Inbound adapters call these to register or authenticate users without
//! knowing how credentials are hashed or stored, which keeps HTTP handler
//! tests independent of persistence.

use async_trait::async_trait;

use crate::domain::{Credentials, Error, UserId};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user id.
    ///
    /// Unknown usernames and wrong passwords fail identically with
    /// [`crate::domain::ErrorCode::Unauthorized`].
    async fn authenticate(&self, credentials: &Credentials) -> Result<UserId, Error>;
}

/// Domain use-case port for account creation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SignupService: Send + Sync {
    /// Register a new account and return its id.
    ///
    /// A taken username fails with [`crate::domain::ErrorCode::Conflict`].
    async fn sign_up(&self, credentials: &Credentials) -> Result<UserId, Error>;
}

//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use aqua::inbound::http::session_config::SessionSettings;
use aqua::outbound::persistence::DbPool;
use aqua::outbound::security::Argon2Settings;

/// Everything `create_server` needs, assembled once at startup.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) argon2: Argon2Settings,
}

impl ServerConfig {
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr, db_pool: DbPool) -> Self {
        Self {
            session,
            bind_addr,
            db_pool,
            argon2: Argon2Settings::default(),
        }
    }

    /// Override the Argon2id work factor used for new password hashes.
    #[must_use]
    pub fn with_argon2(mut self, argon2: Argon2Settings) -> Self {
        self.argon2 = argon2;
        self
    }
}

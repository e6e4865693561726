//! Server configuration loaded via OrthoConfig.
//!
//! Values come from `AQUA_*` environment variables, configuration files, and
//! command-line flags. Session key handling lives in
//! [`crate::inbound::http::session_config`] because it has stricter
//! release-mode rules.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::PoolConfig;
use crate::outbound::security::Argon2Settings;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_DATABASE_URL: &str = "postgres://localhost/aqua";

/// Process-level settings for the HTTP server and its adapters.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "AQUA")]
pub struct ServerSettings {
    /// Interface to bind; defaults to all interfaces.
    pub host: Option<IpAddr>,
    /// TCP port to listen on.
    #[ortho_config(default = 8080)]
    pub port: u16,
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Argon2id memory cost override in KiB.
    pub argon2_memory_kib: Option<u32>,
    /// Argon2id pass count override.
    pub argon2_iterations: Option<u32>,
    /// Argon2id lane count override.
    pub argon2_parallelism: Option<u32>,
}

impl ServerSettings {
    /// Socket address the server binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host.unwrap_or(DEFAULT_HOST), self.port)
    }

    /// Configured database URL, falling back to a local default.
    pub fn database_url(&self) -> &str {
        self.database_url.as_deref().unwrap_or(DEFAULT_DATABASE_URL)
    }

    /// Pool configuration for [`crate::outbound::persistence::DbPool`].
    pub fn pool_config(&self) -> PoolConfig {
        let config = PoolConfig::new(self.database_url());
        match self.pool_max_size {
            Some(max_size) => config.with_max_size(max_size),
            None => config,
        }
    }

    /// Argon2id work factor; unset fields keep the crate defaults.
    pub fn argon2_settings(&self) -> Argon2Settings {
        let defaults = Argon2Settings::default();
        Argon2Settings {
            memory_kib: self.argon2_memory_kib.unwrap_or(defaults.memory_kib),
            iterations: self.argon2_iterations.unwrap_or(defaults.iterations),
            parallelism: self.argon2_parallelism.unwrap_or(defaults.parallelism),
        }
    }
}

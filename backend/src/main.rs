//! Aqua entry-point: loads configuration, prepares the database, and serves
//! the intake tracker over HTTP.

mod server;

use std::io;

use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use aqua::inbound::http::session_config::{BuildMode, session_settings_from_env};
use aqua::outbound::persistence::{DbPool, ensure_schema};
use aqua::settings::ServerSettings;
use server::{ServerConfig, create_server};

fn init_tracing() {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    init_tracing();

    let settings = ServerSettings::load()
        .map_err(|e| io::Error::other(format!("failed to load configuration: {e}")))?;

    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(|e| io::Error::other(format!("invalid session configuration: {e}")))?;
    info!(
        fingerprint = %session.signing_key.fingerprint(),
        ephemeral = session.ephemeral_key,
        "session signing key loaded"
    );

    let pool = DbPool::new(settings.pool_config())
        .await
        .map_err(|e| io::Error::other(format!("database pool unavailable: {e}")))?;
    ensure_schema(&pool)
        .await
        .map_err(|e| io::Error::other(format!("schema bootstrap failed: {e}")))?;

    let bind_addr = settings.bind_addr();
    let config =
        ServerConfig::new(session, bind_addr, pool).with_argon2(settings.argon2_settings());
    let server = create_server(config)?;
    info!(%bind_addr, "listening");
    server.await
}

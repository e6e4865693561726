//! Builders wiring outbound adapters into the HTTP handler state.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};

use aqua::domain::ports::{IntakeRepository, PasswordHasher, UserRepository};
use aqua::domain::{AccountService, IntakeService, SessionTokenCodec, TOKEN_LIFETIME_SECS};
use aqua::inbound::http::session::CookieSettings;
use aqua::inbound::http::state::{HttpState, HttpStatePorts};
use aqua::outbound::persistence::{DieselIntakeRepository, DieselUserRepository};
use aqua::outbound::security::Argon2PasswordHasher;

use super::ServerConfig;

/// Wire account and intake services over the given adapters.
fn build_ports<U, H, R>(
    users: Arc<U>,
    hasher: Arc<H>,
    intake_repo: Arc<R>,
    clock: Arc<dyn Clock>,
) -> HttpStatePorts
where
    U: UserRepository + 'static,
    H: PasswordHasher + 'static,
    R: IntakeRepository + 'static,
{
    let accounts = Arc::new(AccountService::new(users, hasher));
    let intake = Arc::new(IntakeService::new(intake_repo, clock));
    HttpStatePorts {
        login: accounts.clone(),
        signup: accounts,
        intake: intake.clone(),
        intake_query: intake,
    }
}

/// Build the shared HTTP state from the database pool and session settings.
///
/// # Errors
/// Returns [`std::io::Error`] when the Argon2 work factor is rejected.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let hasher = Argon2PasswordHasher::new(config.argon2)
        .map_err(|err| std::io::Error::other(format!("argon2 configuration rejected: {err}")))?;

    let ports = build_ports(
        Arc::new(DieselUserRepository::new(config.db_pool.clone())),
        Arc::new(hasher),
        Arc::new(DieselIntakeRepository::new(config.db_pool.clone())),
        clock.clone(),
    );
    let tokens = SessionTokenCodec::new(config.session.signing_key.clone(), clock);
    let cookies = CookieSettings {
        secure: config.session.cookie_secure,
        same_site: config.session.same_site,
        max_age_secs: TOKEN_LIFETIME_SECS,
    };

    Ok(web::Data::new(HttpState::new(ports, tokens, cookies)))
}

//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and the token codec, and stay testable without I/O.

use std::sync::Arc;

use crate::domain::SessionTokenCodec;
use crate::domain::ports::{IntakeCommand, IntakeQuery, LoginService, SignupService};
use crate::inbound::http::session::CookieSettings;

/// Parameter object bundling the driving ports used by handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub signup: Arc<dyn SignupService>,
    pub intake: Arc<dyn IntakeCommand>,
    pub intake_query: Arc<dyn IntakeQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub signup: Arc<dyn SignupService>,
    pub intake: Arc<dyn IntakeCommand>,
    pub intake_query: Arc<dyn IntakeQuery>,
    pub tokens: Arc<SessionTokenCodec>,
    pub cookies: CookieSettings,
}

impl HttpState {
    /// Assemble handler state from ports and session plumbing.
    pub fn new(ports: HttpStatePorts, tokens: SessionTokenCodec, cookies: CookieSettings) -> Self {
        let HttpStatePorts {
            login,
            signup,
            intake,
            intake_query,
        } = ports;
        Self {
            login,
            signup,
            intake,
            intake_query,
            tokens: Arc::new(tokens),
            cookies,
        }
    }
}

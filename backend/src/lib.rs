//! Aqua: a personal water intake tracker.
//!
//! Users sign up, log in, and count bottles of water per calendar day. The
//! crate follows a ports-and-adapters layout: [`domain`] holds the types,
//! services, and port traits; [`inbound::http`] exposes them over Actix Web;
//! [`outbound`] implements the ports with PostgreSQL and Argon2id.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;

//! Domain primitives, services, and ports.
//!
//! Purpose: Define strongly typed values for accounts, sessions, and the
//! intake ledger, plus the services that implement the driving ports. Keep
//! types immutable and document invariants and serialisation contracts in
//! each type's Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode — transport-agnostic error envelope.
//! - UserId / Username / Credentials — account identity and login input.
//! - BottleSize / IntakeCounts / DailyIntakeRecord / HistoryEntry — ledger.
//! - SessionTokenCodec / SigningKey — signed session tokens.
//! - AccountService / IntakeService — driving port implementations.

pub mod account_service;
pub mod auth;
pub mod bottle;
pub mod error;
pub mod intake;
pub mod intake_service;
pub mod ports;
pub mod session_token;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{Credentials, CredentialsValidationError};
pub use self::bottle::{BottleSize, InvalidBottleSize};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::intake::{
    BottleCountView, DailyIntakeRecord, DailyIntakeView, HistoryEntry, HistoryEntryView,
    IntakeCounts,
};
pub use self::intake_service::IntakeService;
pub use self::session_token::{
    GENERATED_KEY_LEN, SessionTokenCodec, SigningKey, SigningKeyError, TOKEN_LIFETIME_SECS,
    TokenError,
};
pub use self::trace_id::TraceId;
pub use self::user::{USERNAME_MAX, UserId, UserValidationError, Username};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use aqua::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::unauthorized("login required"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;

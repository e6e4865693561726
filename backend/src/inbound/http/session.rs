//! Token cookie handling.
//!
//! The session lives entirely in the signed `token` cookie. [`SessionUser`]
//! resolves the caller from that cookie on every request; the cookie helpers
//! build the `Set-Cookie` values for login, signup, and logout.

use actix_web::cookie::time::Duration as CookieDuration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::domain::{Error, UserId};
use crate::inbound::http::state::HttpState;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "token";

/// Cookie attributes shared by every `Set-Cookie` the app emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookieSettings {
    pub secure: bool,
    pub same_site: SameSite,
    /// `Max-Age` in seconds; matches the token lifetime.
    pub max_age_secs: i64,
}

impl CookieSettings {
    /// Cookie carrying a freshly issued token.
    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build(SESSION_COOKIE, token)
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(self.same_site)
            .max_age(CookieDuration::seconds(self.max_age_secs))
            .finish()
    }

    /// Empty, already-expired cookie that makes the browser drop the token.
    pub fn cleared_cookie(&self) -> Cookie<'static> {
        let mut cookie = Cookie::build(SESSION_COOKIE, "")
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(self.same_site)
            .finish();
        cookie.make_removal();
        cookie
    }
}

/// Caller identity resolved from the `token` cookie.
///
/// Missing, malformed, forged, and expired tokens all resolve to an
/// anonymous caller; handlers decide whether that means a redirect or a
/// `401 Unauthorized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionUser(Option<UserId>);

impl SessionUser {
    pub fn user_id(&self) -> Option<UserId> {
        self.0
    }

    /// Require an authenticated user id or return `401 Unauthorized`.
    pub fn require(&self) -> Result<UserId, Error> {
        self.0.ok_or_else(|| Error::unauthorized("login required"))
    }

    fn resolve(req: &HttpRequest) -> Result<Self, Error> {
        let state = req
            .app_data::<web::Data<HttpState>>()
            .ok_or_else(|| Error::internal("HTTP state is not configured"))?;

        let Some(cookie) = req.cookie(SESSION_COOKIE) else {
            return Ok(Self(None));
        };
        if cookie.value().is_empty() {
            return Ok(Self(None));
        }

        match state.tokens.validate(cookie.value()) {
            Ok(user_id) => Ok(Self(Some(user_id))),
            Err(err) => {
                debug!(error = %err, "rejected session token");
                Ok(Self(None))
            }
        }
    }
}

impl FromRequest for SessionUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::resolve(req))
    }
}

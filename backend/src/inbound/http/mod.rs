//! HTTP inbound adapter exposing the intake tracker's pages and forms.

pub mod error;
pub mod health;
pub mod intake;
pub mod session;
pub mod session_config;
pub mod state;
pub mod users;

use actix_web::http::header;
use actix_web::{HttpResponse, HttpResponseBuilder, web};

pub use error::ApiResult;

/// Register every handler plus the shared form error handling.
///
/// Callers provide [`state::HttpState`] through `App::app_data`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::FormConfig::default().error_handler(error::form_error_handler))
        .service(health::health)
        .service(users::login_form)
        .service(users::login)
        .service(users::signup_form)
        .service(users::signup)
        .service(users::logout)
        .service(intake::home)
        .service(intake::increment)
        .service(intake::history);
}

/// `302 Found` pointing at `location`.
pub(crate) fn found(location: &'static str) -> HttpResponseBuilder {
    let mut builder = HttpResponse::Found();
    builder.insert_header((header::LOCATION, location));
    builder
}

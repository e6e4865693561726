//! Account handlers: login, signup, and logout.
//!
//! ```text
//! GET  /login            static form
//! POST /login            username=alice&password=pw1
//! GET  /signup           static form
//! POST /signup           username=alice&password=pw1
//! GET  /logout
//! ```
//!
//! Successful login and signup set the `token` cookie and redirect to `/`.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use zeroize::Zeroize;

use crate::domain::{Credentials, CredentialsValidationError, Error, UserId, UserValidationError};
use crate::inbound::http::{ApiResult, found};
use crate::inbound::http::state::HttpState;

const LOGIN_PAGE: &str = include_str!("../../../static/login.html");
const SIGNUP_PAGE: &str = include_str!("../../../static/signup.html");

/// Form body for `POST /login` and `POST /signup`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
pub struct CredentialsForm {
    pub username: String,
    pub password: String,
}

impl CredentialsForm {
    fn into_credentials(mut self) -> Result<Credentials, CredentialsValidationError> {
        let credentials = Credentials::try_from_parts(&self.username, &self.password);
        self.password.zeroize();
        credentials
    }
}

fn map_credentials_validation_error(err: CredentialsValidationError) -> Error {
    let (field, code) = match &err {
        CredentialsValidationError::Username(UserValidationError::EmptyUsername) => {
            ("username", "empty_username")
        }
        CredentialsValidationError::Username(UserValidationError::UsernameTooLong { .. }) => {
            ("username", "username_too_long")
        }
        CredentialsValidationError::Username(_) => ("username", "invalid_username"),
        CredentialsValidationError::EmptyPassword => ("password", "empty_password"),
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

fn html(page: &'static str) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(page)
}

/// Issue a token for `user_id` and redirect home with the session cookie.
fn start_session(state: &HttpState, user_id: &UserId) -> ApiResult<HttpResponse> {
    let token = state
        .tokens
        .issue(user_id)
        .map_err(|err| Error::internal(format!("failed to issue session token: {err}")))?;
    Ok(found("/")
        .cookie(state.cookies.session_cookie(token))
        .finish())
}

/// Serve the login form.
#[utoipa::path(
    get,
    path = "/login",
    responses((status = 200, description = "Login form", content_type = "text/html")),
    tags = ["accounts"],
    operation_id = "loginForm",
    security([])
)]
#[get("/login")]
pub async fn login_form() -> HttpResponse {
    html(LOGIN_PAGE)
}

/// Authenticate and start a session.
#[utoipa::path(
    post,
    path = "/login",
    request_body(content = CredentialsForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Logged in; redirect to /", headers(("Set-Cookie" = String, description = "Session token cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    form: web::Form<CredentialsForm>,
) -> ApiResult<HttpResponse> {
    let credentials = form
        .into_inner()
        .into_credentials()
        .map_err(map_credentials_validation_error)?;
    let user_id = state.login.authenticate(&credentials).await?;
    info!(%user_id, "login succeeded");
    start_session(&state, &user_id)
}

/// Serve the signup form.
#[utoipa::path(
    get,
    path = "/signup",
    responses((status = 200, description = "Signup form", content_type = "text/html")),
    tags = ["accounts"],
    operation_id = "signupForm",
    security([])
)]
#[get("/signup")]
pub async fn signup_form() -> HttpResponse {
    html(SIGNUP_PAGE)
}

/// Create an account and start a session.
#[utoipa::path(
    post,
    path = "/signup",
    request_body(content = CredentialsForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Account created; redirect to /", headers(("Set-Cookie" = String, description = "Session token cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Username already taken", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "signup",
    security([])
)]
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    form: web::Form<CredentialsForm>,
) -> ApiResult<HttpResponse> {
    let credentials = form
        .into_inner()
        .into_credentials()
        .map_err(map_credentials_validation_error)?;
    let user_id = state.signup.sign_up(&credentials).await?;
    start_session(&state, &user_id)
}

/// Drop the session cookie and return to the login form.
#[utoipa::path(
    get,
    path = "/logout",
    responses((status = 302, description = "Cookie cleared; redirect to /login")),
    tags = ["accounts"],
    operation_id = "logout",
    security([])
)]
#[get("/logout")]
pub async fn logout(state: web::Data<HttpState>) -> HttpResponse {
    found("/login")
        .cookie(state.cookies.cleared_cookie())
        .finish()
}

//! Intake handlers.
//!
//! ```text
//! GET  /            today's bottle counts
//! POST /increment   increment=500ml
//! GET  /history     per-day totals, newest first
//! ```
//!
//! Page routes send anonymous callers to `/login`; `/increment` answers
//! `401 Unauthorized` instead so scripted clients see a plain failure. The
//! session is checked before the form body, so anonymous callers never see a
//! `400` for a malformed body.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::domain::{BottleSize, DailyIntakeView, Error, HistoryEntryView, InvalidBottleSize};
use crate::inbound::http::error::form_rejection;
use crate::inbound::http::session::SessionUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{ApiResult, found};

/// Form body for `POST /increment`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct IncrementForm {
    /// Bottle size label such as `"500ml"`.
    #[schema(example = "500ml")]
    pub increment: String,
}

fn map_bottle_size_error(err: InvalidBottleSize) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": "increment",
        "value": err.value(),
        "code": "unknown_bottle_size",
    }))
}

/// Today's counts for the logged-in user.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Today's counts", body = DailyIntakeView),
        (status = 302, description = "Not logged in; redirect to /login"),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["intake"],
    operation_id = "today"
)]
#[get("/")]
pub async fn home(state: web::Data<HttpState>, user: SessionUser) -> ApiResult<HttpResponse> {
    let Some(user_id) = user.user_id() else {
        return Ok(found("/login").finish());
    };
    let record = state.intake_query.today(&user_id).await?;
    Ok(HttpResponse::Ok().json(DailyIntakeView::from(&record)))
}

/// Log one bottle for today and return the updated counts.
#[utoipa::path(
    post,
    path = "/increment",
    request_body(content = IncrementForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Updated counts", body = DailyIntakeView),
        (status = 400, description = "Unknown bottle size", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["intake"],
    operation_id = "increment"
)]
#[post("/increment")]
pub async fn increment(
    state: web::Data<HttpState>,
    user: SessionUser,
    form: Result<web::Form<IncrementForm>, actix_web::Error>,
) -> ApiResult<web::Json<DailyIntakeView>> {
    let user_id = user.require()?;
    let form = form.map_err(|err| form_rejection(&err))?;
    let size: BottleSize = form.increment.parse().map_err(map_bottle_size_error)?;
    let record = state.intake.record_bottle(&user_id, size).await?;
    debug!(%user_id, %size, day = %record.day(), "bottle recorded");
    Ok(web::Json(DailyIntakeView::from(&record)))
}

/// Every logged day for the user, newest first.
#[utoipa::path(
    get,
    path = "/history",
    responses(
        (status = 200, description = "Daily totals", body = [HistoryEntryView]),
        (status = 302, description = "Not logged in; redirect to /login"),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["intake"],
    operation_id = "history"
)]
#[get("/history")]
pub async fn history(state: web::Data<HttpState>, user: SessionUser) -> ApiResult<HttpResponse> {
    let Some(user_id) = user.user_id() else {
        return Ok(found("/login").finish());
    };
    let entries = state.intake_query.history(&user_id).await?;
    let views: Vec<HistoryEntryView> = entries.iter().map(HistoryEntryView::from).collect();
    Ok(HttpResponse::Ok().json(views))
}

#[cfg(test)]
mod tests;

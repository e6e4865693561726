//! Tests for the intake handlers.

use super::*;
use crate::domain::{ErrorCode, IntakeCounts, UserId};
use crate::inbound::http::configure;
use crate::inbound::http::session::SESSION_COOKIE;
use crate::test_support::TestHarness;
use actix_web::cookie::Cookie;
use actix_web::http::{StatusCode, header};
use actix_web::{App, test as actix_test};
use chrono::{Days, NaiveDate};
use rstest::{fixture, rstest};

#[fixture]
fn harness() -> TestHarness {
    TestHarness::new()
}

fn token_cookie(harness: &TestHarness, user_id: &UserId) -> Cookie<'static> {
    let token = harness.codec().issue(user_id).expect("issue token");
    Cookie::new(SESSION_COOKIE, token)
}

fn increment_request(size: &str) -> actix_test::TestRequest {
    actix_test::TestRequest::post().uri("/increment").set_form(IncrementForm {
        increment: size.to_owned(),
    })
}

#[rstest]
#[case("/")]
#[case("/history")]
#[actix_web::test]
async fn page_routes_redirect_anonymous_callers(harness: TestHarness, #[case] uri: &str) {
    let app = actix_test::init_service(App::new().app_data(harness.state()).configure(configure)).await;

    let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request()).await;

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(
        res.headers().get(header::LOCATION).map(|v| v.as_bytes()),
        Some(&b"/login"[..])
    );
}

#[rstest]
#[actix_web::test]
async fn home_shows_zero_counts_before_any_increment(harness: TestHarness) {
    let app = actix_test::init_service(App::new().app_data(harness.state()).configure(configure)).await;
    let user = UserId::random();

    let req = actix_test::TestRequest::get()
        .uri("/")
        .cookie(token_cookie(&harness, &user))
        .to_request();
    let view: DailyIntakeView = actix_test::call_and_read_body_json(&app, req).await;

    assert_eq!(view.date, harness.today());
    assert_eq!(view.counts.len(), BottleSize::COUNT);
    assert!(view.counts.iter().all(|entry| entry.count == 0));
    assert_eq!(view.total_litres, 0.0);
}

#[rstest]
#[actix_web::test]
async fn increment_requires_login(harness: TestHarness) {
    let app = actix_test::init_service(App::new().app_data(harness.state()).configure(configure)).await;

    let res = actix_test::call_service(&app, increment_request("500ml").to_request()).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

fn raw_increment_request(content_type: &'static str, body: &'static str) -> actix_test::TestRequest {
    actix_test::TestRequest::post()
        .uri("/increment")
        .insert_header((header::CONTENT_TYPE, content_type))
        .set_payload(body)
}

#[rstest]
#[case("application/x-www-form-urlencoded", "")]
#[case("application/x-www-form-urlencoded", "bottle=500ml")]
#[case("application/json", "{\"increment\":\"500ml\"}")]
#[actix_web::test]
async fn anonymous_malformed_bodies_still_answer_unauthorized(
    harness: TestHarness,
    #[case] content_type: &'static str,
    #[case] body: &'static str,
) {
    let app = actix_test::init_service(App::new().app_data(harness.state()).configure(configure)).await;

    let res = actix_test::call_service(&app, raw_increment_request(content_type, body).to_request()).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let error: Error = actix_test::read_body_json(res).await;
    assert_eq!(error.code(), ErrorCode::Unauthorized);
}

#[rstest]
#[actix_web::test]
async fn logged_in_empty_body_is_a_bad_request(harness: TestHarness) {
    let app = actix_test::init_service(App::new().app_data(harness.state()).configure(configure)).await;
    let cookie = token_cookie(&harness, &UserId::random());

    let req = raw_increment_request("application/x-www-form-urlencoded", "")
        .cookie(cookie)
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let error: Error = actix_test::read_body_json(res).await;
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert!(error.message().starts_with("invalid form body"));
}

#[rstest]
#[actix_web::test]
async fn expired_token_cannot_increment(harness: TestHarness) {
    let app = actix_test::init_service(App::new().app_data(harness.state()).configure(configure)).await;
    let cookie = token_cookie(&harness, &UserId::random());
    harness
        .clock()
        .advance_seconds(harness.codec().lifetime_secs());

    let res = actix_test::call_service(&app, increment_request("500ml").cookie(cookie).to_request()).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[actix_web::test]
async fn increments_accumulate_for_today(harness: TestHarness) {
    let app = actix_test::init_service(App::new().app_data(harness.state()).configure(configure)).await;
    let cookie = token_cookie(&harness, &UserId::random());

    let mut last = None;
    for _ in 0..3 {
        let req = increment_request("500ml").cookie(cookie.clone()).to_request();
        let view: DailyIntakeView = actix_test::call_and_read_body_json(&app, req).await;
        last = Some(view);
    }
    let view = last.expect("three increments");

    let half_litre = view
        .counts
        .iter()
        .find(|entry| entry.size == BottleSize::Ml500)
        .expect("500ml slot");
    assert_eq!(half_litre.count, 3);
    assert_eq!(half_litre.millilitres, 500);
    assert!(
        view.counts
            .iter()
            .filter(|entry| entry.size != BottleSize::Ml500)
            .all(|entry| entry.count == 0)
    );
    assert_eq!(view.total_litres, 1.5);
}

#[rstest]
#[case("250ml")]
#[case("")]
#[case("500")]
#[actix_web::test]
async fn unknown_sizes_are_rejected_without_side_effects(
    harness: TestHarness,
    #[case] size: &str,
) {
    let app = actix_test::init_service(App::new().app_data(harness.state()).configure(configure)).await;
    let user = UserId::random();
    let cookie = token_cookie(&harness, &user);

    let res = actix_test::call_service(&app, increment_request(size).cookie(cookie.clone()).to_request()).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Error = actix_test::read_body_json(res).await;
    assert_eq!(body.code(), ErrorCode::InvalidRequest);
    let details = body.details().expect("details present");
    assert_eq!(details["field"], "increment");
    assert_eq!(details["value"], size);

    let req = actix_test::TestRequest::get().uri("/").cookie(cookie).to_request();
    let view: DailyIntakeView = actix_test::call_and_read_body_json(&app, req).await;
    assert_eq!(view.total_litres, 0.0);
}

#[rstest]
#[actix_web::test]
async fn history_lists_days_newest_first(harness: TestHarness) {
    let app = actix_test::init_service(App::new().app_data(harness.state()).configure(configure)).await;
    let user = UserId::random();
    let today = harness.today();
    let yesterday = today.checked_sub_days(Days::new(1)).expect("valid day");
    let older = NaiveDate::from_ymd_opt(2026, 1, 2).expect("valid day");
    harness
        .intake()
        .seed(user, older, IntakeCounts::from_array([0, 0, 0, 1, 0]));
    harness
        .intake()
        .seed(user, yesterday, IntakeCounts::from_array([1, 0, 0, 0, 0]));
    harness
        .intake()
        .seed(UserId::random(), today, IntakeCounts::from_array([0, 0, 0, 0, 9]));
    let cookie = token_cookie(&harness, &user);
    for _ in 0..3 {
        let req = increment_request("500ml").cookie(cookie.clone()).to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    let req = actix_test::TestRequest::get()
        .uri("/history")
        .cookie(cookie)
        .to_request();
    let views: Vec<HistoryEntryView> = actix_test::call_and_read_body_json(&app, req).await;

    let days: Vec<NaiveDate> = views.iter().map(|view| view.date).collect();
    assert_eq!(days, vec![today, yesterday, older]);
    assert_eq!(views[0].total_litres, 1.5);
    assert_eq!(views[1].total_litres, 0.33);
    assert_eq!(views[2].total_litres, 1.0);
}

#[rstest]
#[actix_web::test]
async fn history_is_empty_for_new_users(harness: TestHarness) {
    let app = actix_test::init_service(App::new().app_data(harness.state()).configure(configure)).await;
    let cookie = token_cookie(&harness, &UserId::random());

    let req = actix_test::TestRequest::get()
        .uri("/history")
        .cookie(cookie)
        .to_request();
    let views: Vec<HistoryEntryView> = actix_test::call_and_read_body_json(&app, req).await;

    assert!(views.is_empty());
}

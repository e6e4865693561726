//! Liveness probe for orchestration and load balancers.

use actix_web::{HttpResponse, get, http::header};

/// Liveness probe. Answers `OK` whenever the process can serve requests.
#[utoipa::path(
    get,
    path = "/health",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is alive", body = String, content_type = "text/plain"),
        (
            status = 405,
            description = "Method not allowed; only GET probes are supported"
        )
    )
)]
#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .content_type("text/plain; charset=utf-8")
        .body("OK")
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;

    #[rstest]
    #[actix_web::test]
    async fn health_answers_ok_without_session() {
        let app = actix_test::init_service(App::new().service(health)).await;

        let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/health").to_request()).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers().get(header::CACHE_CONTROL).map(|v| v.as_bytes()),
            Some(&b"no-store"[..])
        );
        assert_eq!(actix_test::read_body(res).await, "OK");
    }

    #[rstest]
    #[actix_web::test]
    async fn health_rejects_post() {
        let app = actix_test::init_service(App::new().service(health)).await;

        let res = actix_test::call_service(&app, actix_test::TestRequest::post().uri("/health").to_request()).await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}

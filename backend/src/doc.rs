//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects every handler under `inbound::http` plus the JSON views
//! and form bodies they exchange. Swagger UI serves it at `/docs` in debug
//! builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{BottleCountView, DailyIntakeView, Error, ErrorCode, HistoryEntryView};
use crate::inbound::http::intake::IncrementForm;
use crate::inbound::http::users::CredentialsForm;

/// Adds the `token` cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "TokenCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "token",
                "Signed session token set by POST /login and POST /signup.",
            ))),
        );
    }
}

/// OpenAPI document for the HTTP interface.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Aqua water intake API",
        description = "Log bottles of water per day and review daily totals."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("TokenCookie" = [])),
    paths(
        crate::inbound::http::users::login_form,
        crate::inbound::http::users::login,
        crate::inbound::http::users::signup_form,
        crate::inbound::http::users::signup,
        crate::inbound::http::users::logout,
        crate::inbound::http::intake::home,
        crate::inbound::http::intake::increment,
        crate::inbound::http::intake::history,
        crate::inbound::http::health::health,
    ),
    components(schemas(
        Error,
        ErrorCode,
        CredentialsForm,
        IncrementForm,
        BottleCountView,
        DailyIntakeView,
        HistoryEntryView
    )),
    tags(
        (name = "accounts", description = "Signup, login, and logout"),
        (name = "intake", description = "Daily bottle counts and history"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn object_fields(doc: &utoipa::openapi::OpenApi, name: &str) -> Vec<String> {
        let schemas = &doc.components.as_ref().expect("components").schemas;
        match schemas.get(name).unwrap_or_else(|| panic!("{name} schema")) {
            RefOr::T(Schema::Object(obj)) => obj.properties.keys().cloned().collect(),
            _ => panic!("expected Object schema for {name}"),
        }
    }

    #[rstest]
    #[case("Error", &["code", "message", "traceId", "details"])]
    #[case("DailyIntakeView", &["date", "counts", "totalLitres"])]
    #[case("HistoryEntryView", &["date", "totalLitres"])]
    #[case("IncrementForm", &["increment"])]
    #[case("CredentialsForm", &["username", "password"])]
    fn schemas_expose_wire_fields(#[case] name: &str, #[case] fields: &[&str]) {
        let doc = ApiDoc::openapi();
        let present = object_fields(&doc, name);
        for field in fields {
            assert!(
                present.iter().any(|p| p == field),
                "{name} should have field '{field}'"
            );
        }
    }

    #[rstest]
    #[case("/")]
    #[case("/increment")]
    #[case("/history")]
    #[case("/login")]
    #[case("/signup")]
    #[case("/logout")]
    #[case("/health")]
    fn every_route_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }
}

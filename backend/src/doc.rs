//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the login, analytics, metrics and health handlers,
//! the schema wrappers from [`crate::inbound::http::schemas`] and the session
//! cookie security scheme. Swagger UI serves it in debug builds and the
//! `openapi-dump` binary prints it for tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::analytics::{AnalyticsConfigRequest, AnalyticsConfigUpdateRequest};
use crate::inbound::http::schemas::{
    AnalyticsConfigLibrarySchema, AnalyticsConfigSchema, AnalyticsWidgetDataSchema,
    ConfigTypeSchema, ErrorCodeSchema, ErrorSchema, MetricPointSchema, MetricSeriesSchema,
    MetricSummarySchema, MetricTypeSchema, MetricsOverviewSchema, ReportScheduleSchema,
    TimeframeSchema,
};
use crate::inbound::http::users::LoginRequest;

/// Adds the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Wasteflow API",
        description = "Tenant-scoped sustainability analytics, metrics and waste operations records."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::analytics::list_analytics_configs,
        crate::inbound::http::analytics::create_analytics_config,
        crate::inbound::http::analytics::get_analytics_config,
        crate::inbound::http::analytics::update_analytics_config,
        crate::inbound::http::analytics::delete_analytics_config,
        crate::inbound::http::analytics::get_analytics_config_data,
        crate::inbound::http::metrics::get_metric_summaries,
        crate::inbound::http::metrics::get_metric_series,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        LoginRequest,
        AnalyticsConfigRequest,
        AnalyticsConfigUpdateRequest,
        ConfigTypeSchema,
        ReportScheduleSchema,
        AnalyticsConfigSchema,
        AnalyticsConfigLibrarySchema,
        AnalyticsWidgetDataSchema,
        MetricTypeSchema,
        TimeframeSchema,
        MetricSummarySchema,
        MetricPointSchema,
        MetricsOverviewSchema,
        MetricSeriesSchema,
    )),
    tags(
        (name = "auth", description = "Session login"),
        (name = "analytics", description = "Chart, analysis and report configurations"),
        (name = "metrics", description = "Sustainability metric aggregates"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated document.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";
    const CONFIG_SCHEMA_NAME: &str = "crate.domain.AnalyticsConfig";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    fn error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
    }

    #[rstest]
    fn analytics_config_schema_uses_wire_names() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let config_schema = schemas.get(CONFIG_SCHEMA_NAME).expect("config schema");

        assert_object_schema_has_field(config_schema, "type");
        assert_object_schema_has_field(config_schema, "isStandard");
    }

    #[rstest]
    #[case("/api/v1/login")]
    #[case("/api/v1/analytics/configs")]
    #[case("/api/v1/analytics/configs/{id}")]
    #[case("/api/v1/analytics/configs/{id}/data")]
    #[case("/api/v1/metrics")]
    #[case("/api/v1/metrics/{metricType}/series")]
    #[case("/health/ready")]
    fn documents_every_route(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn registers_session_cookie_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}

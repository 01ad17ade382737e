//! OpenAPI schema definitions for domain types.
//!
//! Domain types do not derive `ToSchema`. The wrappers here mirror their wire
//! shape and register under the domain type's path, keeping utoipa in the
//! inbound adapter.

use chrono::{DateTime, Utc};
use serde_json::Value;
use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted, such as editing a standard item.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// Absent from the caller's organization.
    #[schema(rename = "not_found")]
    NotFound,
    /// Clashes with existing state.
    #[schema(rename = "conflict")]
    Conflict,
    /// A backing service is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message.
    #[schema(example = "name must not be empty")]
    message: String,
    /// Correlation identifier, also sent as the `trace-id` header.
    #[schema(example = "0b5e8d7a-6a35-4c43-9b1f-3f3c0c2f0b61")]
    trace_id: Option<String>,
    /// `{field, code}` for validation failures.
    details: Option<Value>,
}

/// OpenAPI schema for [`crate::domain::ConfigType`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ConfigType)]
pub enum ConfigTypeSchema {
    /// Chart widget.
    #[schema(rename = "chart")]
    Chart,
    /// Analysis widget.
    #[schema(rename = "analysis")]
    Analysis,
    /// Scheduled report.
    #[schema(rename = "report")]
    Report,
}

/// OpenAPI schema for [`crate::domain::ReportSchedule`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ReportSchedule)]
pub enum ReportScheduleSchema {
    /// Every day.
    #[schema(rename = "daily")]
    Daily,
    /// Every week.
    #[schema(rename = "weekly")]
    Weekly,
    /// Every month.
    #[schema(rename = "monthly")]
    Monthly,
    /// Every quarter.
    #[schema(rename = "quarterly")]
    Quarterly,
}

/// OpenAPI schema for [`crate::domain::MetricType`].
#[derive(ToSchema)]
#[schema(as = crate::domain::MetricType)]
pub enum MetricTypeSchema {
    /// kg.
    #[schema(rename = "waste_generated")]
    WasteGenerated,
    /// kg.
    #[schema(rename = "waste_diverted")]
    WasteDiverted,
    /// percent.
    #[schema(rename = "recycling_rate")]
    RecyclingRate,
    /// kg_co2e.
    #[schema(rename = "carbon_emissions")]
    CarbonEmissions,
    /// kwh.
    #[schema(rename = "energy_consumption")]
    EnergyConsumption,
    /// m3.
    #[schema(rename = "water_usage")]
    WaterUsage,
}

/// OpenAPI schema for [`crate::domain::Timeframe`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Timeframe)]
pub enum TimeframeSchema {
    /// Last 7 days.
    #[schema(rename = "week")]
    Week,
    /// Last 30 days.
    #[schema(rename = "month")]
    Month,
    /// Last 90 days.
    #[schema(rename = "quarter")]
    Quarter,
    /// Last 365 days.
    #[schema(rename = "year")]
    Year,
}

/// OpenAPI schema for [`crate::domain::AnalyticsConfig`].
#[derive(ToSchema)]
#[schema(as = crate::domain::AnalyticsConfig, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct AnalyticsConfigSchema {
    #[schema(value_type = String, format = Uuid)]
    id: String,
    #[schema(value_type = String, format = Uuid)]
    organization_id: String,
    #[schema(rename = "type")]
    config_type: ConfigTypeSchema,
    #[schema(example = "Waste generated over time")]
    name: String,
    /// Builder payload; `metricTypes` and `timeframe` drive widget data.
    #[schema(value_type = Object)]
    config: Value,
    active: bool,
    is_standard: bool,
    schedule: Option<ReportScheduleSchema>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// OpenAPI schema for [`crate::domain::AnalyticsConfigLibrary`].
#[derive(ToSchema)]
#[schema(as = crate::domain::AnalyticsConfigLibrary)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct AnalyticsConfigLibrarySchema {
    /// Standard items first, then by name.
    charts: Vec<AnalyticsConfigSchema>,
    analyses: Vec<AnalyticsConfigSchema>,
    reports: Vec<AnalyticsConfigSchema>,
}

/// OpenAPI schema for [`crate::domain::MetricSummary`].
#[derive(ToSchema)]
#[schema(as = crate::domain::MetricSummary, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct MetricSummarySchema {
    metric_type: MetricTypeSchema,
    #[schema(example = "kg")]
    unit: String,
    total: f64,
    average: f64,
    count: u64,
    latest_value: f64,
    latest_at: DateTime<Utc>,
}

/// OpenAPI schema for [`crate::domain::MetricPoint`].
#[derive(ToSchema)]
#[schema(as = crate::domain::MetricPoint)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct MetricPointSchema {
    timestamp: DateTime<Utc>,
    value: f64,
}

/// OpenAPI schema for [`crate::domain::MetricsOverview`].
#[derive(ToSchema)]
#[schema(as = crate::domain::MetricsOverview)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct MetricsOverviewSchema {
    timeframe: TimeframeSchema,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    metrics: Vec<MetricSummarySchema>,
}

/// OpenAPI schema for [`crate::domain::MetricSeries`].
#[derive(ToSchema)]
#[schema(as = crate::domain::MetricSeries, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct MetricSeriesSchema {
    metric_type: MetricTypeSchema,
    unit: String,
    timeframe: TimeframeSchema,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    /// Ascending time order.
    points: Vec<MetricPointSchema>,
}

/// OpenAPI schema for [`crate::domain::AnalyticsWidgetData`].
#[derive(ToSchema)]
#[schema(as = crate::domain::AnalyticsWidgetData, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct AnalyticsWidgetDataSchema {
    #[schema(value_type = String, format = Uuid)]
    config_id: String,
    #[schema(rename = "type")]
    config_type: ConfigTypeSchema,
    name: String,
    metric_types: Vec<MetricTypeSchema>,
    timeframe: TimeframeSchema,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    summaries: Vec<MetricSummarySchema>,
    series: Vec<MetricSeriesSchema>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::PartialSchema;

    fn schema_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[rstest]
    fn error_code_schema_lists_every_code() {
        let json = schema_json::<ErrorCodeSchema>();
        for code in [
            "invalid_request",
            "unauthorized",
            "forbidden",
            "not_found",
            "conflict",
            "service_unavailable",
            "internal_error",
        ] {
            assert!(json.contains(code), "missing {code}");
        }
    }

    #[rstest]
    fn error_schema_uses_wire_names() {
        assert_eq!(ErrorSchema::name(), "crate.domain.Error");
        assert!(schema_json::<ErrorSchema>().contains("traceId"));
    }

    #[rstest]
    fn analytics_config_schema_renames_type() {
        let json = schema_json::<AnalyticsConfigSchema>();
        assert!(json.contains("\"type\""));
        assert!(json.contains("isStandard"));
    }
}

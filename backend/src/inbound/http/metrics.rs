//! Sustainability metric handlers.
//!
//! ```text
//! GET /api/v1/metrics?timeframe=quarter&metricType=water_usage
//! GET /api/v1/metrics/{metricType}/series?timeframe=week
//! ```

use actix_web::{get, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::{MetricSeries, MetricType, MetricsOverview, Principal, Timeframe};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, MetricSeriesSchema, MetricsOverviewSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_optional_vocabulary, parse_vocabulary};

const TIMEFRAME_FIELD: FieldName = FieldName::new("timeframe");
const METRIC_TYPE_FIELD: FieldName = FieldName::new("metricType");

/// Query string for `GET /api/v1/metrics`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct MetricsQueryParams {
    /// `week`, `month`, `quarter` or `year`. Defaults to `month`.
    pub timeframe: Option<String>,
    /// Restrict the overview to one metric type.
    pub metric_type: Option<String>,
}

/// Query string for the series endpoint.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SeriesQueryParams {
    /// Defaults to `month`.
    pub timeframe: Option<String>,
}

fn timeframe(raw: Option<&str>) -> ApiResult<Timeframe> {
    Ok(parse_optional_vocabulary(raw, TIMEFRAME_FIELD)?.unwrap_or_default())
}

/// Aggregated metrics for the caller's organization.
///
/// The first request for an organization seeds a synthetic history.
#[utoipa::path(
    get,
    path = "/api/v1/metrics",
    params(MetricsQueryParams),
    responses(
        (status = 200, description = "Metric summaries", body = MetricsOverviewSchema),
        (status = 400, description = "Unknown timeframe or metric type", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["metrics"],
    operation_id = "getMetricSummaries"
)]
#[get("/metrics")]
pub async fn get_metric_summaries(
    state: web::Data<HttpState>,
    principal: Principal,
    query: web::Query<MetricsQueryParams>,
) -> ApiResult<web::Json<MetricsOverview>> {
    let timeframe = timeframe(query.timeframe.as_deref())?;
    let metric_type: Option<MetricType> =
        parse_optional_vocabulary(query.metric_type.as_deref(), METRIC_TYPE_FIELD)?;
    let overview = state
        .metrics
        .overview(principal.organization_id(), timeframe, metric_type)
        .await?;
    Ok(web::Json(overview))
}

/// Points for one metric type in ascending time order.
#[utoipa::path(
    get,
    path = "/api/v1/metrics/{metricType}/series",
    params(
        ("metricType" = String, Path, description = "Metric type, e.g. `waste_generated`"),
        SeriesQueryParams
    ),
    responses(
        (status = 200, description = "Metric series", body = MetricSeriesSchema),
        (status = 400, description = "Unknown timeframe or metric type", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["metrics"],
    operation_id = "getMetricSeries"
)]
#[get("/metrics/{metric_type}/series")]
pub async fn get_metric_series(
    state: web::Data<HttpState>,
    principal: Principal,
    path: web::Path<String>,
    query: web::Query<SeriesQueryParams>,
) -> ApiResult<web::Json<MetricSeries>> {
    let metric_type: MetricType = parse_vocabulary(&path, METRIC_TYPE_FIELD)?;
    let timeframe = timeframe(query.timeframe.as_deref())?;
    let series = state
        .metrics
        .series(principal.organization_id(), metric_type, timeframe)
        .await?;
    Ok(web::Json(series))
}

#[cfg(test)]
#[path = "metrics_tests.rs"]
mod tests;

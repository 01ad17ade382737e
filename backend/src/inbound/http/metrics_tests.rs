//! Handler tests for the metric endpoints.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use chrono::{DateTime, Utc};
use rstest::rstest;
use serde_json::Value;

use crate::domain::ports::MockMetricsQuery;
use crate::domain::{Error, MetricType, Timeframe};
use crate::inbound::http::test_utils::{init_api, login_cookie, memory_state};

async fn get_json(uri: &str, state: crate::inbound::http::state::HttpState) -> (StatusCode, Value) {
    let app = init_api(state).await;
    let cookie = login_cookie(&app).await;
    let request = actix_test::TestRequest::get()
        .uri(uri)
        .cookie(cookie)
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    let status = response.status();
    let body: Value = actix_test::read_body_json(response).await;
    (status, body)
}

fn timestamp(value: &Value) -> DateTime<Utc> {
    value
        .as_str()
        .and_then(|raw| raw.parse().ok())
        .expect("RFC 3339 timestamp")
}

#[rstest]
#[actix_web::test]
async fn overview_defaults_to_month_and_covers_every_metric() {
    let (status, body) = get_json("/api/v1/metrics", memory_state()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timeframe"], "month");
    let metric_types: Vec<&str> = body["metrics"]
        .as_array()
        .expect("metrics array")
        .iter()
        .filter_map(|summary| summary["metricType"].as_str())
        .collect();
    let expected: Vec<&str> = MetricType::ALL.iter().map(|metric| metric.as_str()).collect();
    assert_eq!(metric_types, expected);
    assert!(timestamp(&body["from"]) < timestamp(&body["to"]));
}

#[rstest]
#[actix_web::test]
async fn overview_filters_by_metric_type() {
    let (status, body) = get_json(
        "/api/v1/metrics?timeframe=week&metricType=recycling_rate",
        memory_state(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timeframe"], "week");
    let metrics = body["metrics"].as_array().expect("metrics array");
    assert_eq!(metrics.len(), 1);
    assert_eq!(metrics[0]["metricType"], "recycling_rate");
    assert_eq!(metrics[0]["unit"], "percent");
}

#[rstest]
#[case("/api/v1/metrics?timeframe=fortnight", "timeframe", "fortnight")]
#[case("/api/v1/metrics?metricType=noise", "metricType", "noise")]
#[case("/api/v1/metrics/noise/series", "metricType", "noise")]
#[case("/api/v1/metrics/water_usage/series?timeframe=decade", "timeframe", "decade")]
#[actix_web::test]
async fn unknown_vocabulary_is_rejected(
    #[case] uri: &str,
    #[case] field: &str,
    #[case] value: &str,
) {
    let (status, body) = get_json(uri, memory_state()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["field"], field);
    assert_eq!(body["details"]["value"], value);
    assert_eq!(body["details"]["code"], "unknown_value");
}

#[rstest]
#[actix_web::test]
async fn series_points_ascend_within_the_window() {
    let (status, body) = get_json(
        "/api/v1/metrics/waste_generated/series?timeframe=week",
        memory_state(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["metricType"], "waste_generated");
    assert_eq!(body["unit"], "kg");
    let from = timestamp(&body["from"]);
    let stamps: Vec<DateTime<Utc>> = body["points"]
        .as_array()
        .expect("points array")
        .iter()
        .map(|point| timestamp(&point["timestamp"]))
        .collect();
    assert!(!stamps.is_empty());
    assert!(stamps.windows(2).all(|pair| pair[0] <= pair[1]));
    assert!(stamps.iter().all(|stamp| *stamp >= from));
}

#[rstest]
#[actix_web::test]
async fn metrics_require_a_session() {
    let app = init_api(memory_state()).await;
    let request = actix_test::TestRequest::get()
        .uri("/api/v1/metrics")
        .to_request();

    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[actix_web::test]
async fn overview_passes_parsed_values_to_the_port() {
    let mut metrics = MockMetricsQuery::new();
    metrics
        .expect_overview()
        .withf(|_, timeframe, metric_type| {
            *timeframe == Timeframe::Quarter && *metric_type == Some(MetricType::CarbonEmissions)
        })
        .times(1)
        .return_once(|_, _, _| Err(Error::service_unavailable("metrics repository unavailable")));
    let mut state = memory_state();
    state.metrics = Arc::new(metrics);

    let (status, body) = get_json(
        "/api/v1/metrics?timeframe=quarter&metricType=carbon_emissions",
        state,
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "service_unavailable");
}

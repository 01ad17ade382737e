//! Tests for the metrics service.

use std::sync::Arc;

use chrono::Duration;
use rstest::rstest;
use uuid::Uuid;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::MockMetricsRepository;
use crate::domain::test_support::{fixture_clock, fixture_now};

fn sample(
    organization_id: OrganizationId,
    metric_type: MetricType,
    value: f64,
    days_ago: i64,
) -> SustainabilityMetric {
    SustainabilityMetric::new(
        Uuid::new_v4(),
        organization_id,
        metric_type,
        value,
        fixture_now() - Duration::days(days_ago),
    )
    .expect("valid sample")
}

fn make_service(repo: MockMetricsRepository) -> MetricsService<MockMetricsRepository> {
    MetricsService::new(Arc::new(repo), fixture_clock(fixture_now())).with_history_days(3)
}

#[tokio::test]
async fn first_read_seeds_history_once() {
    let org = OrganizationId::random();
    let mut repo = MockMetricsRepository::new();
    repo.expect_seed_run_exists()
        .times(1)
        .return_once(|_| Ok(false));
    repo.expect_seed()
        .withf(|_, samples, seeded_at| {
            samples.len() == 3 * MetricType::ALL.len() && *seeded_at == fixture_now()
        })
        .times(1)
        .returning(|_, samples, _| {
            Ok(SeedOutcome::Seeded {
                samples: samples.len(),
            })
        });
    repo.expect_samples_since()
        .times(1)
        .returning(|_, _, _| Ok(Vec::new()));

    let overview = make_service(repo)
        .overview(&org, Timeframe::Week, None)
        .await
        .expect("overview");

    assert!(overview.metrics.is_empty());
    assert_eq!(overview.to, fixture_now());
    assert_eq!(overview.from, fixture_now() - Duration::days(7));
}

#[tokio::test]
async fn seeded_organization_skips_generation() {
    let mut repo = MockMetricsRepository::new();
    repo.expect_seed_run_exists()
        .times(1)
        .return_once(|_| Ok(true));
    repo.expect_seed().never();

    let outcome = make_service(repo)
        .ensure_seeded(&OrganizationId::random())
        .await
        .expect("seeding check");

    assert_eq!(outcome, SeedOutcome::AlreadySeeded);
}

#[tokio::test]
async fn overview_aggregates_loaded_samples() {
    let org = OrganizationId::random();
    let samples = vec![
        sample(org, MetricType::WaterUsage, 10.0, 2),
        sample(org, MetricType::WasteGenerated, 4.0, 1),
        sample(org, MetricType::WaterUsage, 30.0, 1),
    ];
    let mut repo = MockMetricsRepository::new();
    repo.expect_seed_run_exists().return_once(|_| Ok(true));
    repo.expect_samples_since()
        .withf(move |id, since, types| {
            id == &org && *since == fixture_now() - Duration::days(30) && types.is_empty()
        })
        .return_once(move |_, _, _| Ok(samples));

    let overview = make_service(repo)
        .overview(&org, Timeframe::Month, None)
        .await
        .expect("overview");

    let totals: Vec<(MetricType, f64)> = overview
        .metrics
        .iter()
        .map(|summary| (summary.metric_type, summary.total))
        .collect();
    assert_eq!(
        totals,
        vec![(MetricType::WasteGenerated, 4.0), (MetricType::WaterUsage, 40.0)]
    );
}

#[tokio::test]
async fn overview_passes_single_type_filter() {
    let mut repo = MockMetricsRepository::new();
    repo.expect_seed_run_exists().return_once(|_| Ok(true));
    repo.expect_samples_since()
        .withf(|_, _, types| types == [MetricType::CarbonEmissions])
        .return_once(|_, _, _| Ok(Vec::new()));

    let overview = make_service(repo)
        .overview(
            &OrganizationId::random(),
            Timeframe::Year,
            Some(MetricType::CarbonEmissions),
        )
        .await
        .expect("overview");

    assert_eq!(overview.timeframe, Timeframe::Year);
}

#[tokio::test]
async fn series_is_ascending_with_unit() {
    let org = OrganizationId::random();
    let samples = vec![
        sample(org, MetricType::EnergyConsumption, 2.0, 1),
        sample(org, MetricType::EnergyConsumption, 1.0, 5),
    ];
    let mut repo = MockMetricsRepository::new();
    repo.expect_seed_run_exists().return_once(|_| Ok(true));
    repo.expect_samples_since()
        .return_once(move |_, _, _| Ok(samples));

    let series = make_service(repo)
        .series(&org, MetricType::EnergyConsumption, Timeframe::Week)
        .await
        .expect("series");

    assert_eq!(series.unit, "kwh");
    let values: Vec<f64> = series.points.iter().map(|point| point.value).collect();
    assert_eq!(values, vec![1.0, 2.0]);
}

#[tokio::test]
async fn snapshot_omits_types_without_points() {
    let org = OrganizationId::random();
    let samples = vec![sample(org, MetricType::RecyclingRate, 55.0, 1)];
    let mut repo = MockMetricsRepository::new();
    repo.expect_seed_run_exists().return_once(|_| Ok(true));
    repo.expect_samples_since()
        .return_once(move |_, _, _| Ok(samples));

    let snapshot = make_service(repo)
        .snapshot(
            &org,
            Timeframe::Quarter,
            &[MetricType::RecyclingRate, MetricType::WasteDiverted],
        )
        .await
        .expect("snapshot");

    assert_eq!(snapshot.series.len(), 1);
    assert_eq!(snapshot.series[0].metric_type, MetricType::RecyclingRate);
    assert_eq!(snapshot.summaries.len(), 1);
}

#[rstest]
#[case(MetricsRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(MetricsRepositoryError::query("syntax"), ErrorCode::InternalError)]
#[tokio::test]
async fn repository_errors_map_to_api_codes(
    #[case] failure: MetricsRepositoryError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockMetricsRepository::new();
    repo.expect_seed_run_exists()
        .return_once(move |_| Err(failure));

    let error = make_service(repo)
        .overview(&OrganizationId::random(), Timeframe::Month, None)
        .await
        .expect_err("repository failure");

    assert_eq!(error.code(), expected);
}

//! Synthetic metric history for organizations without measurements.
//!
//! Waste generated and the diversion rate are generated independently; waste
//! diverted is derived from both so the three series stay consistent.

use chrono::{DateTime, Duration, NaiveTime, Utc};
use synthetic_metrics::{
    ProfileError, SeriesProfile, SyntheticSample, derive_seed, generate_series, seed_from_bytes,
};
use thiserror::Error;
use uuid::Uuid;

use super::{InvalidMetricValue, MetricType, SustainabilityMetric};
use crate::domain::OrganizationId;

/// Days of history written on first use.
pub const DEFAULT_HISTORY_DAYS: u32 = 365;

const WASTE_GENERATED: SeriesProfile = SeriesProfile {
    baseline: 850.0,
    amplitude: 120.0,
    noise: 60.0,
    trend_per_day: -0.3,
    floor: 300.0,
    ceiling: 1_500.0,
};

const DIVERSION_RATE: SeriesProfile = SeriesProfile {
    baseline: 55.0,
    amplitude: 5.0,
    noise: 4.0,
    trend_per_day: 0.02,
    floor: 20.0,
    ceiling: 95.0,
};

const CARBON_EMISSIONS: SeriesProfile = SeriesProfile {
    baseline: 1_200.0,
    amplitude: 150.0,
    noise: 80.0,
    trend_per_day: -0.5,
    floor: 400.0,
    ceiling: 2_500.0,
};

const ENERGY_CONSUMPTION: SeriesProfile = SeriesProfile {
    baseline: 3_400.0,
    amplitude: 500.0,
    noise: 200.0,
    trend_per_day: -1.0,
    floor: 1_000.0,
    ceiling: 6_000.0,
};

const WATER_USAGE: SeriesProfile = SeriesProfile {
    baseline: 45.0,
    amplitude: 8.0,
    noise: 4.0,
    trend_per_day: -0.01,
    floor: 10.0,
    ceiling: 90.0,
};

/// Failure while building a synthetic history.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyntheticHistoryError {
    /// A built-in profile was rejected by the generator.
    #[error("synthetic profile for {metric} is invalid: {source}")]
    Profile {
        /// Metric whose profile failed.
        metric: MetricType,
        /// Generator error.
        #[source]
        source: ProfileError,
    },
    /// A generated value failed sample validation.
    #[error(transparent)]
    Value(#[from] InvalidMetricValue),
}

/// Build `days` daily samples per [`MetricType`] ending today.
///
/// Samples are stamped at midnight UTC; the newest is today's. Values depend
/// only on `organization_id` and `days`, so reruns reproduce the same history.
///
/// # Errors
///
/// Returns [`SyntheticHistoryError`] if a built-in profile is invalid.
pub fn synthetic_history(
    organization_id: &OrganizationId,
    now: DateTime<Utc>,
    days: u32,
) -> Result<Vec<SustainabilityMetric>, SyntheticHistoryError> {
    let base_seed = seed_from_bytes(organization_id.as_uuid().as_bytes());
    let series = |metric: MetricType, profile: &SeriesProfile| {
        generate_series(profile, derive_seed(base_seed, metric.as_str()), days)
            .map_err(|source| SyntheticHistoryError::Profile { metric, source })
    };

    let generated = series(MetricType::WasteGenerated, &WASTE_GENERATED)?;
    let rates = series(MetricType::RecyclingRate, &DIVERSION_RATE)?;
    let diverted: Vec<SyntheticSample> = generated
        .iter()
        .zip(&rates)
        .map(|(waste, rate)| SyntheticSample {
            day_offset: waste.day_offset,
            value: round_cents(waste.value * rate.value / 100.0),
        })
        .collect();

    let streams = [
        (MetricType::WasteGenerated, generated),
        (MetricType::WasteDiverted, diverted),
        (MetricType::RecyclingRate, rates),
        (
            MetricType::CarbonEmissions,
            series(MetricType::CarbonEmissions, &CARBON_EMISSIONS)?,
        ),
        (
            MetricType::EnergyConsumption,
            series(MetricType::EnergyConsumption, &ENERGY_CONSUMPTION)?,
        ),
        (
            MetricType::WaterUsage,
            series(MetricType::WaterUsage, &WATER_USAGE)?,
        ),
    ];

    let today = now.date_naive().and_time(NaiveTime::MIN).and_utc();
    let oldest = today - Duration::days(i64::from(days.saturating_sub(1)));
    let mut samples = Vec::with_capacity(streams.len() * days as usize);
    for (metric_type, stream) in streams {
        for sample in stream {
            samples.push(SustainabilityMetric::new(
                Uuid::new_v4(),
                *organization_id,
                metric_type,
                sample.value,
                oldest + Duration::days(i64::from(sample.day_offset)),
            )?);
        }
    }
    Ok(samples)
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

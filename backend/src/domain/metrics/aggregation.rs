//! Pure aggregation over metric samples.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{MetricType, SustainabilityMetric};

/// Totals for one metric type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSummary {
    /// Measured quantity.
    pub metric_type: MetricType,
    /// Unit of `total`, `average` and `latest_value`.
    pub unit: String,
    /// Sum of sample values.
    pub total: f64,
    /// `total / count`.
    pub average: f64,
    /// Number of samples.
    pub count: usize,
    /// Value of the most recent sample.
    pub latest_value: f64,
    /// Time of the most recent sample.
    pub latest_at: DateTime<Utc>,
}

/// One point of a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricPoint {
    /// Measurement time.
    pub timestamp: DateTime<Utc>,
    /// Measured value.
    pub value: f64,
}

struct Accumulator {
    total: f64,
    count: usize,
    latest_value: f64,
    latest_at: DateTime<Utc>,
}

/// Summarise samples per metric type.
///
/// Types without samples are omitted; the rest come back in [`MetricType`]
/// declaration order regardless of input order.
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use uuid::Uuid;
/// use wasteflow::domain::{MetricType, OrganizationId, SustainabilityMetric, aggregate};
///
/// let org = OrganizationId::random();
/// let now = Utc::now();
/// let samples = [2.0, 4.0].map(|value| {
///     SustainabilityMetric::new(Uuid::new_v4(), org, MetricType::WaterUsage, value, now).unwrap()
/// });
/// let summaries = aggregate(&samples);
/// assert_eq!(summaries.len(), 1);
/// assert_eq!(summaries[0].average, 3.0);
/// ```
#[must_use]
pub fn aggregate(samples: &[SustainabilityMetric]) -> Vec<MetricSummary> {
    let mut by_type: BTreeMap<MetricType, Accumulator> = BTreeMap::new();
    for sample in samples {
        by_type
            .entry(sample.metric_type())
            .and_modify(|acc| {
                acc.total += sample.value();
                acc.count += 1;
                if sample.timestamp() >= acc.latest_at {
                    acc.latest_at = sample.timestamp();
                    acc.latest_value = sample.value();
                }
            })
            .or_insert_with(|| Accumulator {
                total: sample.value(),
                count: 1,
                latest_value: sample.value(),
                latest_at: sample.timestamp(),
            });
    }

    by_type
        .into_iter()
        .map(|(metric_type, acc)| MetricSummary {
            metric_type,
            unit: metric_type.unit().to_owned(),
            total: acc.total,
            average: mean(acc.total, acc.count),
            count: acc.count,
            latest_value: acc.latest_value,
            latest_at: acc.latest_at,
        })
        .collect()
}

/// Points of one metric type in ascending time order.
#[must_use]
pub fn series_for(samples: &[SustainabilityMetric], metric_type: MetricType) -> Vec<MetricPoint> {
    let mut points: Vec<MetricPoint> = samples
        .iter()
        .filter(|sample| sample.metric_type() == metric_type)
        .map(|sample| MetricPoint {
            timestamp: sample.timestamp(),
            value: sample.value(),
        })
        .collect();
    points.sort_by_key(|point| point.timestamp);
    points
}

fn mean(total: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}

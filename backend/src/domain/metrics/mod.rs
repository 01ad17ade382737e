//! Sustainability metric time series.
//!
//! Samples are append-only. Each organization receives a synthetic history on
//! first use (see [`synthetic_history`]) and every read aggregates the samples
//! inside a [`Timeframe`] window.

mod aggregation;
mod history;

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::vocabulary::text_enum;
use super::OrganizationId;

pub use aggregation::{MetricPoint, MetricSummary, aggregate, series_for};
pub use history::{DEFAULT_HISTORY_DAYS, SyntheticHistoryError, synthetic_history};

text_enum! {
    /// Tracked sustainability measure. Declaration order is the reporting order.
    pub enum MetricType as "metric type" {
        /// Mass of waste produced.
        WasteGenerated => "waste_generated",
        /// Mass of waste kept out of landfill.
        WasteDiverted => "waste_diverted",
        /// Share of generated waste that was diverted.
        RecyclingRate => "recycling_rate",
        /// Greenhouse gas emissions.
        CarbonEmissions => "carbon_emissions",
        /// Electricity and fuel use.
        EnergyConsumption => "energy_consumption",
        /// Mains water use.
        WaterUsage => "water_usage",
    }
}

impl MetricType {
    /// Unit every sample of this type is recorded in.
    #[must_use]
    pub const fn unit(self) -> &'static str {
        match self {
            Self::WasteGenerated | Self::WasteDiverted => "kg",
            Self::RecyclingRate => "percent",
            Self::CarbonEmissions => "kg_co2e",
            Self::EnergyConsumption => "kwh",
            Self::WaterUsage => "m3",
        }
    }
}

text_enum! {
    /// Trailing reporting window.
    #[derive(Default)]
    pub enum Timeframe as "timeframe" {
        /// Last 7 days.
        Week => "week",
        /// Last 30 days.
        #[default]
        Month => "month",
        /// Last 90 days.
        Quarter => "quarter",
        /// Last 365 days.
        Year => "year",
    }
}

impl Timeframe {
    /// Window length in days.
    #[must_use]
    pub const fn days(self) -> i64 {
        match self {
            Self::Week => 7,
            Self::Month => 30,
            Self::Quarter => 90,
            Self::Year => 365,
        }
    }

    /// Inclusive window start for a window ending at `now`.
    #[must_use]
    pub fn start(self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::days(self.days())
    }
}

/// A sample value was NaN, infinite or negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvalidMetricValue(pub f64);

impl fmt::Display for InvalidMetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "metric value must be finite and non-negative, got {}", self.0)
    }
}

impl std::error::Error for InvalidMetricValue {}

/// One recorded measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SustainabilityMetric {
    id: Uuid,
    organization_id: OrganizationId,
    metric_type: MetricType,
    value: f64,
    timestamp: DateTime<Utc>,
}

impl SustainabilityMetric {
    /// Validate and build a sample.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMetricValue`] when `value` is not finite or is negative.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use uuid::Uuid;
    /// use wasteflow::domain::{MetricType, OrganizationId, SustainabilityMetric};
    ///
    /// let org = OrganizationId::random();
    /// assert!(SustainabilityMetric::new(Uuid::new_v4(), org, MetricType::WaterUsage, -1.0, Utc::now()).is_err());
    /// ```
    pub fn new(
        id: Uuid,
        organization_id: OrganizationId,
        metric_type: MetricType,
        value: f64,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, InvalidMetricValue> {
        if !value.is_finite() || value < 0.0 {
            return Err(InvalidMetricValue(value));
        }
        Ok(Self {
            id,
            organization_id,
            metric_type,
            value,
            timestamp,
        })
    }

    /// Sample identifier.
    #[must_use]
    pub const fn id(&self) -> &Uuid {
        &self.id
    }

    /// Owning organization.
    #[must_use]
    pub const fn organization_id(&self) -> &OrganizationId {
        &self.organization_id
    }

    /// Measured quantity.
    #[must_use]
    pub const fn metric_type(&self) -> MetricType {
        self.metric_type
    }

    /// Measured value in [`MetricType::unit`].
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// Measurement time.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Aggregated view returned by `GET /metrics`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsOverview {
    /// Requested window.
    pub timeframe: Timeframe,
    /// Window start.
    pub from: DateTime<Utc>,
    /// Window end, the time of the request.
    pub to: DateTime<Utc>,
    /// One summary per metric type with samples.
    pub metrics: Vec<MetricSummary>,
}

/// Ordered points for one metric type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSeries {
    /// Measured quantity.
    pub metric_type: MetricType,
    /// Unit of every point.
    pub unit: String,
    /// Requested window.
    pub timeframe: Timeframe,
    /// Window start.
    pub from: DateTime<Utc>,
    /// Window end.
    pub to: DateTime<Utc>,
    /// Points in ascending time order.
    pub points: Vec<MetricPoint>,
}

/// Summaries plus per-type series for a set of metric types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSnapshot {
    /// Requested window.
    pub timeframe: Timeframe,
    /// Window start.
    pub from: DateTime<Utc>,
    /// Window end.
    pub to: DateTime<Utc>,
    /// Aggregates in [`MetricType`] declaration order.
    pub summaries: Vec<MetricSummary>,
    /// One series per selected type that has samples.
    pub series: Vec<MetricSeries>,
}

/// Result of a seeding attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// This call wrote the marker and the given number of samples.
    Seeded {
        /// Samples written.
        samples: usize,
    },
    /// A seed run was already recorded; nothing was written.
    AlreadySeeded,
}

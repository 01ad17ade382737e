//! Metric aggregation service.
//!
//! Implements [`MetricsQuery`] over a [`MetricsRepository`]. Every read first
//! makes sure the organization has a synthetic history, so dashboards are
//! never empty.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{MetricsQuery, MetricsRepository, MetricsRepositoryError};
use crate::domain::{
    DEFAULT_HISTORY_DAYS, Error, MetricSeries, MetricSnapshot, MetricType, MetricsOverview,
    OrganizationId, SeedOutcome, SustainabilityMetric, Timeframe, aggregate, series_for,
    synthetic_history,
};

/// Metrics service implementing the [`MetricsQuery`] driving port.
#[derive(Clone)]
pub struct MetricsService<R> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
    history_days: u32,
}

impl<R> MetricsService<R> {
    /// Create a service seeding [`DEFAULT_HISTORY_DAYS`] of history.
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            clock,
            history_days: DEFAULT_HISTORY_DAYS,
        }
    }

    /// Override how many days of history a first request seeds.
    #[must_use]
    pub fn with_history_days(mut self, days: u32) -> Self {
        self.history_days = days;
        self
    }
}

fn map_repository_error(error: MetricsRepositoryError) -> Error {
    match error {
        MetricsRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("metrics repository unavailable: {message}"))
        }
        MetricsRepositoryError::Query { message } => {
            Error::internal(format!("metrics repository error: {message}"))
        }
    }
}

impl<R: MetricsRepository> MetricsService<R> {
    /// Seed synthetic history unless a seed run is already recorded.
    ///
    /// # Errors
    ///
    /// Returns `service_unavailable` or `internal_error` when the repository
    /// fails, and `internal_error` when the history cannot be generated.
    pub async fn ensure_seeded(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<SeedOutcome, Error> {
        if self
            .repository
            .seed_run_exists(organization_id)
            .await
            .map_err(map_repository_error)?
        {
            return Ok(SeedOutcome::AlreadySeeded);
        }

        let now = self.clock.utc();
        let samples = synthetic_history(organization_id, now, self.history_days)
            .map_err(|err| Error::internal(format!("synthetic history failed: {err}")))?;
        let outcome = self
            .repository
            .seed(organization_id, &samples, now)
            .await
            .map_err(map_repository_error)?;
        match outcome {
            SeedOutcome::Seeded { samples } => {
                info!(%organization_id, samples, "seeded synthetic metric history");
            }
            SeedOutcome::AlreadySeeded => {
                debug!(%organization_id, "metric history seeded concurrently");
            }
        }
        Ok(outcome)
    }

    async fn window(
        &self,
        organization_id: &OrganizationId,
        timeframe: Timeframe,
        metric_types: &[MetricType],
    ) -> Result<(DateTime<Utc>, DateTime<Utc>, Vec<SustainabilityMetric>), Error> {
        self.ensure_seeded(organization_id).await?;
        let to = self.clock.utc();
        let from = timeframe.start(to);
        let samples = self
            .repository
            .samples_since(organization_id, from, metric_types)
            .await
            .map_err(map_repository_error)?;
        Ok((from, to, samples))
    }
}

#[async_trait]
impl<R: MetricsRepository> MetricsQuery for MetricsService<R> {
    async fn overview(
        &self,
        organization_id: &OrganizationId,
        timeframe: Timeframe,
        metric_type: Option<MetricType>,
    ) -> Result<MetricsOverview, Error> {
        let selection: Vec<MetricType> = metric_type.into_iter().collect();
        let (from, to, samples) = self.window(organization_id, timeframe, &selection).await?;
        Ok(MetricsOverview {
            timeframe,
            from,
            to,
            metrics: aggregate(&samples),
        })
    }

    async fn series(
        &self,
        organization_id: &OrganizationId,
        metric_type: MetricType,
        timeframe: Timeframe,
    ) -> Result<MetricSeries, Error> {
        let (from, to, samples) = self
            .window(organization_id, timeframe, &[metric_type])
            .await?;
        Ok(MetricSeries {
            metric_type,
            unit: metric_type.unit().to_owned(),
            timeframe,
            from,
            to,
            points: series_for(&samples, metric_type),
        })
    }

    async fn snapshot(
        &self,
        organization_id: &OrganizationId,
        timeframe: Timeframe,
        metric_types: &[MetricType],
    ) -> Result<MetricSnapshot, Error> {
        let (from, to, samples) = self
            .window(organization_id, timeframe, metric_types)
            .await?;
        let series = MetricType::ALL
            .iter()
            .copied()
            .filter(|metric| metric_types.is_empty() || metric_types.contains(metric))
            .map(|metric_type| MetricSeries {
                metric_type,
                unit: metric_type.unit().to_owned(),
                timeframe,
                from,
                to,
                points: series_for(&samples, metric_type),
            })
            .filter(|series| !series.points.is_empty())
            .collect();
        Ok(MetricSnapshot {
            timeframe,
            from,
            to,
            summaries: aggregate(&samples),
            series,
        })
    }
}

#[cfg(test)]
#[path = "metrics_service_tests.rs"]
mod tests;

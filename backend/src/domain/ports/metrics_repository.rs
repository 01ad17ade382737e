//! Port for sustainability metric persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{MetricType, OrganizationId, SeedOutcome, SustainabilityMetric};

use super::define_port_error;

define_port_error! {
    /// Errors raised by metrics repository adapters.
    pub enum MetricsRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "metrics repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "metrics repository query failed: {message}",
    }
}

/// Append-only metric samples plus the per-organization seed marker.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetricsRepository: Send + Sync {
    /// Whether a seed run is recorded for the organization.
    async fn seed_run_exists(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<bool, MetricsRepositoryError>;

    /// Record a seed run stamped `seeded_at` and store `samples` atomically.
    ///
    /// When a marker already exists nothing is written and
    /// [`SeedOutcome::AlreadySeeded`] is returned, so concurrent seeders are
    /// harmless.
    async fn seed(
        &self,
        organization_id: &OrganizationId,
        samples: &[SustainabilityMetric],
        seeded_at: DateTime<Utc>,
    ) -> Result<SeedOutcome, MetricsRepositoryError>;

    /// Samples with `timestamp >= since`, optionally limited to some types.
    ///
    /// An empty `metric_types` slice means every type.
    async fn samples_since(
        &self,
        organization_id: &OrganizationId,
        since: DateTime<Utc>,
        metric_types: &[MetricType],
    ) -> Result<Vec<SustainabilityMetric>, MetricsRepositoryError>;
}

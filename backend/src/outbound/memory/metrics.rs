//! In-memory metric samples and seed markers.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{MetricsRepository, MetricsRepositoryError};
use crate::domain::{MetricType, OrganizationId, SeedOutcome, SustainabilityMetric};

use super::POISONED;

#[derive(Debug, Default)]
struct MetricsState {
    seeded: HashSet<OrganizationId>,
    samples: Vec<SustainabilityMetric>,
}

/// In-memory [`MetricsRepository`].
#[derive(Debug, Default)]
pub struct MemoryMetricsRepository {
    state: Mutex<MetricsState>,
}

impl MemoryMetricsRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, MetricsState>, MetricsRepositoryError> {
        self.state
            .lock()
            .map_err(|_| MetricsRepositoryError::connection(POISONED))
    }
}

#[async_trait]
impl MetricsRepository for MemoryMetricsRepository {
    async fn seed_run_exists(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<bool, MetricsRepositoryError> {
        Ok(self.lock()?.seeded.contains(organization_id))
    }

    async fn seed(
        &self,
        organization_id: &OrganizationId,
        samples: &[SustainabilityMetric],
        _seeded_at: DateTime<Utc>,
    ) -> Result<SeedOutcome, MetricsRepositoryError> {
        let mut state = self.lock()?;
        if !state.seeded.insert(*organization_id) {
            return Ok(SeedOutcome::AlreadySeeded);
        }
        state.samples.extend_from_slice(samples);
        Ok(SeedOutcome::Seeded {
            samples: samples.len(),
        })
    }

    async fn samples_since(
        &self,
        organization_id: &OrganizationId,
        since: DateTime<Utc>,
        metric_types: &[MetricType],
    ) -> Result<Vec<SustainabilityMetric>, MetricsRepositoryError> {
        let state = self.lock()?;
        let mut samples: Vec<SustainabilityMetric> = state
            .samples
            .iter()
            .filter(|sample| sample.organization_id() == organization_id)
            .filter(|sample| sample.timestamp() >= since)
            .filter(|sample| metric_types.is_empty() || metric_types.contains(&sample.metric_type()))
            .cloned()
            .collect();
        samples.sort_by_key(SustainabilityMetric::timestamp);
        Ok(samples)
    }
}

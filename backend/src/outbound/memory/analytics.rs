//! In-memory analytics configuration storage.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{AnalyticsConfigRepository, AnalyticsConfigRepositoryError};
use crate::domain::{AnalyticsConfig, AnalyticsConfigId, OrganizationId};

use super::POISONED;

/// In-memory [`AnalyticsConfigRepository`].
///
/// Names are unique per organization and type, mirroring the
/// `analytics_configs_org_type_name_key` constraint.
#[derive(Debug, Default)]
pub struct MemoryAnalyticsConfigRepository {
    configs: Mutex<Vec<AnalyticsConfig>>,
}

impl MemoryAnalyticsConfigRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<AnalyticsConfig>>, AnalyticsConfigRepositoryError> {
        self.configs
            .lock()
            .map_err(|_| AnalyticsConfigRepositoryError::connection(POISONED))
    }
}

fn clashes(existing: &AnalyticsConfig, candidate: &AnalyticsConfig) -> bool {
    existing.organization_id() == candidate.organization_id()
        && existing.config_type() == candidate.config_type()
        && existing.name() == candidate.name()
        && existing.id() != candidate.id()
}

#[async_trait]
impl AnalyticsConfigRepository for MemoryAnalyticsConfigRepository {
    async fn list(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<Vec<AnalyticsConfig>, AnalyticsConfigRepositoryError> {
        Ok(self
            .lock()?
            .iter()
            .filter(|config| config.organization_id() == organization_id)
            .cloned()
            .collect())
    }

    async fn find(
        &self,
        organization_id: &OrganizationId,
        id: &AnalyticsConfigId,
    ) -> Result<Option<AnalyticsConfig>, AnalyticsConfigRepositoryError> {
        Ok(self
            .lock()?
            .iter()
            .find(|config| config.organization_id() == organization_id && config.id() == id)
            .cloned())
    }

    async fn insert(&self, config: &AnalyticsConfig) -> Result<(), AnalyticsConfigRepositoryError> {
        let mut configs = self.lock()?;
        if configs.iter().any(|existing| clashes(existing, config)) {
            return Err(AnalyticsConfigRepositoryError::duplicate(config.name().as_ref()));
        }
        configs.push(config.clone());
        Ok(())
    }

    async fn update(
        &self,
        config: &AnalyticsConfig,
    ) -> Result<bool, AnalyticsConfigRepositoryError> {
        let mut configs = self.lock()?;
        if configs.iter().any(|existing| clashes(existing, config)) {
            return Err(AnalyticsConfigRepositoryError::duplicate(config.name().as_ref()));
        }
        match configs.iter_mut().find(|existing| {
            existing.organization_id() == config.organization_id() && existing.id() == config.id()
        }) {
            Some(slot) => {
                *slot = config.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(
        &self,
        organization_id: &OrganizationId,
        id: &AnalyticsConfigId,
    ) -> Result<bool, AnalyticsConfigRepositoryError> {
        let mut configs = self.lock()?;
        let before = configs.len();
        configs.retain(|config| !(config.organization_id() == organization_id && config.id() == id));
        Ok(configs.len() < before)
    }

    async fn insert_standard_if_absent(
        &self,
        organization_id: &OrganizationId,
        standard: &[AnalyticsConfig],
    ) -> Result<usize, AnalyticsConfigRepositoryError> {
        let mut configs = self.lock()?;
        let mut inserted = 0;
        for config in standard
            .iter()
            .filter(|config| config.organization_id() == organization_id)
        {
            if !configs.iter().any(|existing| clashes(existing, config)) {
                configs.push(config.clone());
                inserted += 1;
            }
        }
        Ok(inserted)
    }
}

//! Analytics configuration service.
//!
//! Implements the configuration driving ports: builder submissions, library
//! listing with lazy standard seeding, guarded edits and widget data.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::ports::{
    AnalyticsConfigCommand, AnalyticsConfigQuery, AnalyticsConfigRepository,
    AnalyticsConfigRepositoryError, MetricsQuery,
};
use crate::domain::{
    AnalyticsConfig, AnalyticsConfigDraft, AnalyticsConfigId, AnalyticsConfigLibrary,
    AnalyticsConfigUpdate, AnalyticsConfigUpdateError, AnalyticsWidgetData, Error,
    OrganizationId, Timeframe, WidgetSelection, standard_configs,
};

/// Service implementing [`AnalyticsConfigCommand`] and [`AnalyticsConfigQuery`].
#[derive(Clone)]
pub struct AnalyticsConfigService<R> {
    repository: Arc<R>,
    metrics: Arc<dyn MetricsQuery>,
    clock: Arc<dyn Clock>,
}

impl<R> AnalyticsConfigService<R> {
    /// Create a service over `repository`, reading widget data from `metrics`.
    pub fn new(repository: Arc<R>, metrics: Arc<dyn MetricsQuery>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            metrics,
            clock,
        }
    }
}

fn map_repository_error(error: AnalyticsConfigRepositoryError) -> Error {
    match error {
        AnalyticsConfigRepositoryError::Connection { message } => Error::service_unavailable(
            format!("analytics config repository unavailable: {message}"),
        ),
        AnalyticsConfigRepositoryError::Query { message } => {
            Error::internal(format!("analytics config repository error: {message}"))
        }
        AnalyticsConfigRepositoryError::Duplicate { name } => Error::conflict(format!(
            "an analytics configuration named '{name}' already exists"
        ))
        .with_details(json!({ "field": "name", "code": "duplicate_name" })),
    }
}

fn not_found(id: &AnalyticsConfigId) -> Error {
    Error::not_found(format!("analytics configuration {id} not found"))
}

fn standard_locked(message: &str) -> Error {
    Error::forbidden(message).with_details(json!({ "code": "standard_config" }))
}

impl<R: AnalyticsConfigRepository> AnalyticsConfigService<R> {
    async fn load(
        &self,
        organization_id: &OrganizationId,
        id: &AnalyticsConfigId,
    ) -> Result<AnalyticsConfig, Error> {
        self.repository
            .find(organization_id, id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found(id))
    }

    async fn seed_standard(&self, organization_id: &OrganizationId) -> Result<(), Error> {
        let standard = standard_configs(*organization_id, self.clock.utc());
        let inserted = self
            .repository
            .insert_standard_if_absent(organization_id, &standard)
            .await
            .map_err(map_repository_error)?;
        if inserted > 0 {
            info!(%organization_id, inserted, "seeded standard analytics configurations");
        }
        Ok(())
    }
}

#[async_trait]
impl<R: AnalyticsConfigRepository> AnalyticsConfigQuery for AnalyticsConfigService<R> {
    async fn library(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<AnalyticsConfigLibrary, Error> {
        let mut configs = self
            .repository
            .list(organization_id)
            .await
            .map_err(map_repository_error)?;
        if !configs.iter().any(AnalyticsConfig::is_standard) {
            self.seed_standard(organization_id).await?;
            configs = self
                .repository
                .list(organization_id)
                .await
                .map_err(map_repository_error)?;
        }
        Ok(AnalyticsConfigLibrary::from_configs(configs))
    }

    async fn get(
        &self,
        organization_id: &OrganizationId,
        id: &AnalyticsConfigId,
    ) -> Result<AnalyticsConfig, Error> {
        self.load(organization_id, id).await
    }

    async fn widget_data(
        &self,
        organization_id: &OrganizationId,
        id: &AnalyticsConfigId,
        timeframe: Option<Timeframe>,
    ) -> Result<AnalyticsWidgetData, Error> {
        let config = self.load(organization_id, id).await?;
        let selection = WidgetSelection::from_config(&config, timeframe);
        for entry in &selection.skipped {
            warn!(config_id = %id, entry = %entry, "skipping unrecognised payload entry");
        }
        let snapshot = self
            .metrics
            .snapshot(organization_id, selection.timeframe, &selection.metric_types)
            .await?;
        Ok(AnalyticsWidgetData::assemble(&config, selection, snapshot))
    }
}

#[async_trait]
impl<R: AnalyticsConfigRepository> AnalyticsConfigCommand for AnalyticsConfigService<R> {
    async fn create(
        &self,
        organization_id: &OrganizationId,
        draft: AnalyticsConfigDraft,
    ) -> Result<AnalyticsConfig, Error> {
        let config = AnalyticsConfig::from_draft(*organization_id, draft, self.clock.utc());
        self.repository
            .insert(&config)
            .await
            .map_err(map_repository_error)?;
        Ok(config)
    }

    async fn update(
        &self,
        organization_id: &OrganizationId,
        id: &AnalyticsConfigId,
        update: AnalyticsConfigUpdate,
    ) -> Result<AnalyticsConfig, Error> {
        let existing = self.load(organization_id, id).await?;
        let revised = existing
            .revise(update, self.clock.utc())
            .map_err(|err| match err {
                AnalyticsConfigUpdateError::StandardLocked => {
                    standard_locked("standard configurations can only be activated or deactivated")
                }
                AnalyticsConfigUpdateError::Invalid(invalid) => Error::from(invalid),
            })?;
        if !self
            .repository
            .update(&revised)
            .await
            .map_err(map_repository_error)?
        {
            return Err(not_found(id));
        }
        Ok(revised)
    }

    async fn delete(
        &self,
        organization_id: &OrganizationId,
        id: &AnalyticsConfigId,
    ) -> Result<(), Error> {
        let existing = self.load(organization_id, id).await?;
        if existing.is_standard() {
            return Err(standard_locked("standard configurations cannot be deleted"));
        }
        if !self
            .repository
            .delete(organization_id, id)
            .await
            .map_err(map_repository_error)?
        {
            return Err(not_found(id));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "analytics_config_service_tests.rs"]
mod tests;

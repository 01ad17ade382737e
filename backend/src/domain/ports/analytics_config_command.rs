//! Driving port for analytics configuration mutations.

use async_trait::async_trait;

use crate::domain::{
    AnalyticsConfig, AnalyticsConfigDraft, AnalyticsConfigId, AnalyticsConfigUpdate, Error,
    OrganizationId,
};

/// Builder submissions and library edits.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalyticsConfigCommand: Send + Sync {
    /// Store a builder submission as a custom configuration.
    async fn create(
        &self,
        organization_id: &OrganizationId,
        draft: AnalyticsConfigDraft,
    ) -> Result<AnalyticsConfig, Error>;

    /// Replace name, payload, active flag and schedule.
    async fn update(
        &self,
        organization_id: &OrganizationId,
        id: &AnalyticsConfigId,
        update: AnalyticsConfigUpdate,
    ) -> Result<AnalyticsConfig, Error>;

    /// Delete a custom configuration.
    async fn delete(
        &self,
        organization_id: &OrganizationId,
        id: &AnalyticsConfigId,
    ) -> Result<(), Error>;
}

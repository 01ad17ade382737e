//! Port for analytics configuration persistence.
//!
//! Every method is scoped to one organization; adapters must never return or
//! touch rows owned by another tenant.

use async_trait::async_trait;

use crate::domain::{AnalyticsConfig, AnalyticsConfigId, OrganizationId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by analytics configuration repository adapters.
    pub enum AnalyticsConfigRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "analytics config repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "analytics config repository query failed: {message}",
        /// Another configuration of the same type already uses the name.
        Duplicate { name: String } =>
            "an analytics configuration named '{name}' already exists",
    }
}

/// Storage for analytics configurations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalyticsConfigRepository: Send + Sync {
    /// Every configuration of the organization, in no particular order.
    async fn list(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<Vec<AnalyticsConfig>, AnalyticsConfigRepositoryError>;

    /// One configuration, if it exists in the organization.
    async fn find(
        &self,
        organization_id: &OrganizationId,
        id: &AnalyticsConfigId,
    ) -> Result<Option<AnalyticsConfig>, AnalyticsConfigRepositoryError>;

    /// Store a new configuration.
    ///
    /// Fails with [`AnalyticsConfigRepositoryError::Duplicate`] when the
    /// `(organization, type, name)` triple is taken.
    async fn insert(&self, config: &AnalyticsConfig) -> Result<(), AnalyticsConfigRepositoryError>;

    /// Replace a stored configuration. Returns `false` when no row matched.
    async fn update(&self, config: &AnalyticsConfig)
    -> Result<bool, AnalyticsConfigRepositoryError>;

    /// Remove a configuration. Returns `false` when no row matched.
    async fn delete(
        &self,
        organization_id: &OrganizationId,
        id: &AnalyticsConfigId,
    ) -> Result<bool, AnalyticsConfigRepositoryError>;

    /// Insert standard configurations whose `(type, name)` is still free.
    ///
    /// Safe to call concurrently; returns how many rows this call wrote.
    async fn insert_standard_if_absent(
        &self,
        organization_id: &OrganizationId,
        configs: &[AnalyticsConfig],
    ) -> Result<usize, AnalyticsConfigRepositoryError>;
}

//! Driving port for reading analytics configurations and their widget data.

use async_trait::async_trait;

use crate::domain::{
    AnalyticsConfig, AnalyticsConfigId, AnalyticsConfigLibrary, AnalyticsWidgetData, Error,
    OrganizationId, Timeframe,
};

/// Library listing, lookup and widget data.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalyticsConfigQuery: Send + Sync {
    /// Grouped library. Seeds the standard set on first use.
    async fn library(&self, organization_id: &OrganizationId)
    -> Result<AnalyticsConfigLibrary, Error>;

    /// One configuration.
    async fn get(
        &self,
        organization_id: &OrganizationId,
        id: &AnalyticsConfigId,
    ) -> Result<AnalyticsConfig, Error>;

    /// Data for rendering one configuration as a widget.
    ///
    /// `timeframe` overrides the window stored in the payload.
    async fn widget_data(
        &self,
        organization_id: &OrganizationId,
        id: &AnalyticsConfigId,
        timeframe: Option<Timeframe>,
    ) -> Result<AnalyticsWidgetData, Error>;
}

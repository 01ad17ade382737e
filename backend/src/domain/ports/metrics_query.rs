//! Driving port for metric aggregation.

use async_trait::async_trait;

use crate::domain::{
    Error, MetricSeries, MetricSnapshot, MetricType, MetricsOverview, OrganizationId, Timeframe,
};

/// Read side of sustainability metrics. Implementations seed on first use.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetricsQuery: Send + Sync {
    /// Per-type summaries over the window, optionally for one type only.
    async fn overview(
        &self,
        organization_id: &OrganizationId,
        timeframe: Timeframe,
        metric_type: Option<MetricType>,
    ) -> Result<MetricsOverview, Error>;

    /// Ascending points for one type over the window.
    async fn series(
        &self,
        organization_id: &OrganizationId,
        metric_type: MetricType,
        timeframe: Timeframe,
    ) -> Result<MetricSeries, Error>;

    /// Summaries and series for a selection of types.
    async fn snapshot(
        &self,
        organization_id: &OrganizationId,
        timeframe: Timeframe,
        metric_types: &[MetricType],
    ) -> Result<MetricSnapshot, Error>;
}

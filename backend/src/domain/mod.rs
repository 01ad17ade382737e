//! Domain primitives, aggregates and services.
//!
//! Purpose: define strongly typed tenant data used by the API and persistence
//! layers, and the services that implement the driving ports. Types here know
//! nothing about HTTP or SQL.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable identifiers.
//! - OrganizationId / UserId / Principal: tenant identity.
//! - AnalyticsConfig and friends: stored chart, analysis and report builders.
//! - SustainabilityMetric and aggregates: time-series metrics.
//! - TenantRecord and the five record collections.

pub mod analytics_config;
mod analytics_config_service;
pub mod auth;
pub mod error;
pub mod metrics;
mod metrics_service;
pub mod ports;
mod record_service;
pub mod records;
pub mod tenant;
#[cfg(test)]
pub(crate) mod test_support;
pub mod trace_id;
mod vocabulary;

pub use self::analytics_config::{
    AnalyticsConfig, AnalyticsConfigDraft, AnalyticsConfigId, AnalyticsConfigLibrary,
    AnalyticsConfigParts, AnalyticsConfigUpdate, AnalyticsConfigUpdateError,
    AnalyticsConfigValidationError, AnalyticsWidgetData, CONFIG_NAME_MAX, ConfigName, ConfigType,
    ReportSchedule, WidgetSelection, standard_configs,
};
pub use self::analytics_config_service::AnalyticsConfigService;
pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::metrics::{
    DEFAULT_HISTORY_DAYS, InvalidMetricValue, MetricPoint, MetricSeries, MetricSnapshot,
    MetricSummary, MetricType, MetricsOverview, SeedOutcome, SustainabilityMetric,
    SyntheticHistoryError, Timeframe, aggregate, series_for, synthetic_history,
};
pub use self::metrics_service::MetricsService;
pub use self::record_service::RecordService;
pub use self::records::{
    Certification, CertificationFields, CertificationStatus, Invoice, InvoiceFields,
    InvoiceStatus, PickupFrequency, RecordFields, RecordId, RecordKind, RecordReference,
    RecordValidationError, Schedule, ScheduleFields, ScheduleStatus, TenantRecord, Vendor,
    VendorFields, VendorStatus, WastePoint, WastePointFields, WasteType,
};
pub use self::tenant::{
    FIXTURE_ORGANIZATION_ID, FIXTURE_USER_ID, OrganizationId, Principal, UserId,
};
pub use self::trace_id::TraceId;
pub use self::vocabulary::UnknownVariant;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use wasteflow::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::forbidden("standard configurations are read-only"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;

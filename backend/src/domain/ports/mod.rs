//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports (`*Repository`) describe storage the domain needs; driving
//! ports (`*Command`, `*Query`, [`LoginService`]) are what inbound adapters
//! call. Repository errors are typed enums built with `define_port_error!`.

mod macros;
pub(crate) use macros::define_port_error;

mod analytics_config_command;
mod analytics_config_query;
mod analytics_config_repository;
mod login_service;
mod metrics_query;
mod metrics_repository;
mod record_command;
mod record_query;
mod record_repository;

pub use analytics_config_command::AnalyticsConfigCommand;
#[cfg(test)]
pub use analytics_config_command::MockAnalyticsConfigCommand;
pub use analytics_config_query::AnalyticsConfigQuery;
#[cfg(test)]
pub use analytics_config_query::MockAnalyticsConfigQuery;
#[cfg(test)]
pub use analytics_config_repository::MockAnalyticsConfigRepository;
pub use analytics_config_repository::{
    AnalyticsConfigRepository, AnalyticsConfigRepositoryError,
};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{FixtureLoginService, LoginService};
pub use metrics_query::MetricsQuery;
#[cfg(test)]
pub use metrics_query::MockMetricsQuery;
#[cfg(test)]
pub use metrics_repository::MockMetricsRepository;
pub use metrics_repository::{MetricsRepository, MetricsRepositoryError};
#[cfg(test)]
pub use record_command::MockRecordCommand;
pub use record_command::RecordCommand;
#[cfg(test)]
pub use record_query::MockRecordQuery;
pub use record_query::RecordQuery;
#[cfg(test)]
pub use record_repository::MockRecordRepository;
pub use record_repository::{RecordRepository, RecordRepositoryError};

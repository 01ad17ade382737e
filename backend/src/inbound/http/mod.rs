//! HTTP inbound adapter exposing REST endpoints.
//!
//! Everything under `/api/v1` is registered by [`configure_api`]; health
//! probes sit outside the versioned scope.

pub mod analytics;
pub mod error;
pub mod health;
pub mod metrics;
pub mod records;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub(crate) mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register login, analytics, metrics and record routes on `cfg`.
///
/// Callers mount the result under `/api/v1` inside the session middleware.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use wasteflow::inbound::http::configure_api;
///
/// let app = App::new().service(web::scope("/api/v1").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .app_data(web::PathConfig::default().error_handler(error::path_error_handler))
        .service(users::login)
        .service(analytics::list_analytics_configs)
        .service(analytics::create_analytics_config)
        .service(analytics::get_analytics_config_data)
        .service(analytics::get_analytics_config)
        .service(analytics::update_analytics_config)
        .service(analytics::delete_analytics_config)
        .service(metrics::get_metric_summaries)
        .service(metrics::get_metric_series)
        .configure(records::configure_records);
}

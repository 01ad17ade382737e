//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories translate between row structs and domain types and map
//! database failures onto port errors. Row structs and the schema stay
//! private to this module. Connections come from a `bb8` pool through
//! `diesel-async`; migrations run once at startup on a blocking thread.
//!
//! # Example
//!
//! ```ignore
//! use wasteflow::outbound::persistence::{DbPool, DieselVendorRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/wasteflow")).await?;
//! let vendors = DieselVendorRepository::new(pool);
//! ```

mod diesel_analytics_config_repository;
mod diesel_metrics_repository;
mod diesel_record_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod record_rows;
mod schema;

pub use diesel_analytics_config_repository::DieselAnalyticsConfigRepository;
pub use diesel_metrics_repository::DieselMetricsRepository;
pub use diesel_record_repository::{
    DieselCertificationRepository, DieselInvoiceRepository, DieselScheduleRepository,
    DieselVendorRepository, DieselWastePointRepository,
};
pub use migrations::{MigrationError, migrate, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};

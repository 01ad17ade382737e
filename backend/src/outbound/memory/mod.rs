//! In-process adapters for running without PostgreSQL.
//!
//! State lives behind `std::sync::Mutex` and disappears with the process.
//! The adapters enforce the same tenant scoping, uniqueness and reference
//! rules as the Diesel repositories so handlers behave identically in both
//! modes. Integration tests drive the HTTP surface through these.

mod analytics;
mod metrics;
mod records;

pub use analytics::MemoryAnalyticsConfigRepository;
pub use metrics::MemoryMetricsRepository;
pub use records::{MemoryCollection, MemoryRecordRepository, MemoryRecordStore, RecordTables};

const POISONED: &str = "in-memory store lock poisoned";

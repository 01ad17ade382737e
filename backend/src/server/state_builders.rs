//! Builders wiring repositories into services and HTTP state.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    AnalyticsConfigRepository, FixtureLoginService, MetricsQuery, MetricsRepository,
    RecordRepository,
};
use crate::domain::{
    AnalyticsConfigService, CertificationFields, InvoiceFields, MetricsService, RecordFields,
    RecordService, ScheduleFields, VendorFields, WastePointFields,
};
use crate::inbound::http::state::{HttpState, RecordPorts, RecordStatePorts};
use crate::outbound::memory::{
    MemoryAnalyticsConfigRepository, MemoryMetricsRepository, MemoryRecordStore,
};
use crate::outbound::persistence::{
    DbPool, DieselAnalyticsConfigRepository, DieselCertificationRepository,
    DieselInvoiceRepository, DieselMetricsRepository, DieselScheduleRepository,
    DieselVendorRepository, DieselWastePointRepository,
};

use super::ServerConfig;

fn record_ports<F, R>(repository: R, clock: &Arc<dyn Clock>) -> RecordPorts<F>
where
    F: RecordFields,
    R: RecordRepository<F> + 'static,
{
    RecordPorts::from_service(Arc::new(RecordService::new(
        Arc::new(repository),
        Arc::clone(clock),
    )))
}

fn assemble<A, M>(
    analytics: A,
    metrics: M,
    records: RecordStatePorts,
    clock: Arc<dyn Clock>,
    history_days: u32,
) -> HttpState
where
    A: AnalyticsConfigRepository + 'static,
    M: MetricsRepository + 'static,
{
    let metrics: Arc<dyn MetricsQuery> = Arc::new(
        MetricsService::new(Arc::new(metrics), Arc::clone(&clock)).with_history_days(history_days),
    );
    let analytics = Arc::new(AnalyticsConfigService::new(
        Arc::new(analytics),
        Arc::clone(&metrics),
        clock,
    ));
    HttpState {
        login: Arc::new(FixtureLoginService),
        analytics_configs: analytics.clone(),
        analytics_configs_query: analytics,
        metrics,
        records,
    }
}

/// HTTP state backed by PostgreSQL through `pool`.
pub fn diesel_http_state(pool: &DbPool, clock: Arc<dyn Clock>, history_days: u32) -> HttpState {
    let records = RecordStatePorts {
        waste_points: record_ports::<WastePointFields, _>(
            DieselWastePointRepository::new(pool.clone()),
            &clock,
        ),
        vendors: record_ports::<VendorFields, _>(DieselVendorRepository::new(pool.clone()), &clock),
        schedules: record_ports::<ScheduleFields, _>(
            DieselScheduleRepository::new(pool.clone()),
            &clock,
        ),
        invoices: record_ports::<InvoiceFields, _>(
            DieselInvoiceRepository::new(pool.clone()),
            &clock,
        ),
        certifications: record_ports::<CertificationFields, _>(
            DieselCertificationRepository::new(pool.clone()),
            &clock,
        ),
    };
    assemble(
        DieselAnalyticsConfigRepository::new(pool.clone()),
        DieselMetricsRepository::new(pool.clone()),
        records,
        clock,
        history_days,
    )
}

/// HTTP state backed by process-local adapters. Nothing survives a restart.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use mockable::DefaultClock;
/// use wasteflow::server::memory_http_state;
///
/// let state = memory_http_state(Arc::new(DefaultClock), 30);
/// # let _ = state;
/// ```
pub fn memory_http_state(clock: Arc<dyn Clock>, history_days: u32) -> HttpState {
    let store = MemoryRecordStore::new();
    let records = RecordStatePorts {
        waste_points: record_ports(store.repository::<WastePointFields>(), &clock),
        vendors: record_ports(store.repository::<VendorFields>(), &clock),
        schedules: record_ports(store.repository::<ScheduleFields>(), &clock),
        invoices: record_ports(store.repository::<InvoiceFields>(), &clock),
        certifications: record_ports(store.repository::<CertificationFields>(), &clock),
    };
    assemble(
        MemoryAnalyticsConfigRepository::new(),
        MemoryMetricsRepository::new(),
        records,
        clock,
        history_days,
    )
}

/// Choose Diesel or in-memory adapters depending on the configured pool.
pub(crate) fn build_http_state(config: &ServerConfig) -> HttpState {
    match &config.db_pool {
        Some(pool) => diesel_http_state(pool, Arc::clone(&config.clock), config.history_days),
        None => memory_http_state(Arc::clone(&config.clock), config.history_days),
    }
}

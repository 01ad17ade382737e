//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see driving ports, so
//! they stay testable with mocks and independent of the storage mode.

use std::sync::Arc;

use crate::domain::ports::{
    AnalyticsConfigCommand, AnalyticsConfigQuery, LoginService, MetricsQuery, RecordCommand,
    RecordQuery,
};
use crate::domain::{
    CertificationFields, InvoiceFields, RecordFields, ScheduleFields, VendorFields,
    WastePointFields,
};

/// Command and query ports for one record collection.
pub struct RecordPorts<F: RecordFields> {
    /// Create, replace and delete.
    pub command: Arc<dyn RecordCommand<F>>,
    /// List and get.
    pub query: Arc<dyn RecordQuery<F>>,
}

impl<F: RecordFields> Clone for RecordPorts<F> {
    fn clone(&self) -> Self {
        Self {
            command: Arc::clone(&self.command),
            query: Arc::clone(&self.query),
        }
    }
}

impl<F: RecordFields> RecordPorts<F> {
    /// Use one service for both sides.
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: RecordCommand<F> + RecordQuery<F> + 'static,
    {
        Self {
            command: service.clone(),
            query: service,
        }
    }
}

/// Ports for the five record collections.
#[derive(Clone)]
pub struct RecordStatePorts {
    pub waste_points: RecordPorts<WastePointFields>,
    pub vendors: RecordPorts<VendorFields>,
    pub schedules: RecordPorts<ScheduleFields>,
    pub invoices: RecordPorts<InvoiceFields>,
    pub certifications: RecordPorts<CertificationFields>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub analytics_configs: Arc<dyn AnalyticsConfigCommand>,
    pub analytics_configs_query: Arc<dyn AnalyticsConfigQuery>,
    pub metrics: Arc<dyn MetricsQuery>,
    pub records: RecordStatePorts,
}

/// Record collections reachable through [`HttpState`].
pub trait RecordCollection: RecordFields {
    /// Ports serving this collection.
    fn ports(state: &HttpState) -> &RecordPorts<Self>;
}

macro_rules! record_collection {
    ($fields:ty => $slot:ident) => {
        impl RecordCollection for $fields {
            fn ports(state: &HttpState) -> &RecordPorts<Self> {
                &state.records.$slot
            }
        }
    };
}

record_collection!(WastePointFields => waste_points);
record_collection!(VendorFields => vendors);
record_collection!(ScheduleFields => schedules);
record_collection!(InvoiceFields => invoices);
record_collection!(CertificationFields => certifications);

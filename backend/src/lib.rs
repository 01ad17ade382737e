//! Wasteflow backend library.
//!
//! Hexagonal layout: [`domain`] holds types, services and ports; [`inbound`]
//! adapts HTTP to the driving ports; [`outbound`] implements the driven ports
//! with Diesel or in-process storage; [`server`] wires them into an Actix app.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;

//! Property listing backend.
//!
//! The crate follows a ports-and-adapters layout:
//!
//! - [`domain`] holds the property model, validation, listing filters,
//!   statistics and the service implementing the driving ports.
//! - [`inbound::http`] exposes the REST endpoints and the response envelope.
//! - [`outbound`] provides the MongoDB and in-memory repositories.
//! - [`middleware`] attaches a trace identifier to every request.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;

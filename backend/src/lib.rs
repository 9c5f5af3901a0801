//! Gadget registry backend.
//!
//! Hexagonal layout: [`domain`] holds entities, services and ports;
//! [`inbound`] and [`outbound`] hold the HTTP and persistence/security
//! adapters.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::{Trace, cors};

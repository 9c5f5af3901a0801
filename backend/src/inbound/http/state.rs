//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` and only see domain
//! ports, so they stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AuthCommand, GadgetCommand, GadgetQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub auth: Arc<dyn AuthCommand>,
    pub gadgets: Arc<dyn GadgetCommand>,
    pub gadgets_query: Arc<dyn GadgetQuery>,
}

impl HttpState {
    /// Bundle the driving ports.
    pub fn new(
        auth: Arc<dyn AuthCommand>,
        gadgets: Arc<dyn GadgetCommand>,
        gadgets_query: Arc<dyn GadgetQuery>,
    ) -> Self {
        Self {
            auth,
            gadgets,
            gadgets_query,
        }
    }
}

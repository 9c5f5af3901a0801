//! Port for gadget persistence.

use async_trait::async_trait;

use crate::domain::{Codename, Gadget, GadgetId, GadgetMutation, GadgetStatus, GadgetWithCreator};

use super::define_port_error;

define_port_error! {
    /// Errors raised by gadget repository adapters.
    pub enum GadgetPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "gadget repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "gadget repository query failed: {message}",
    }
}

/// Storage operations for gadgets.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GadgetRepository: Send + Sync {
    /// List gadgets newest first, optionally restricted to one status.
    async fn list(
        &self,
        status: Option<GadgetStatus>,
    ) -> Result<Vec<GadgetWithCreator>, GadgetPersistenceError>;

    /// Fetch a gadget by id.
    async fn find_by_id(&self, id: &GadgetId) -> Result<Option<Gadget>, GadgetPersistenceError>;

    /// True when some gadget already carries `codename`.
    ///
    /// Codenames are not unique in storage; this only steers generation.
    async fn codename_exists(&self, codename: &Codename) -> Result<bool, GadgetPersistenceError>;

    /// Insert a new gadget.
    async fn insert(&self, gadget: &Gadget) -> Result<(), GadgetPersistenceError>;

    /// Apply `mutation` to the stored row and return the result.
    ///
    /// Returns `Ok(None)` when no row matches `id`.
    async fn apply(
        &self,
        id: &GadgetId,
        mutation: &GadgetMutation,
    ) -> Result<Option<Gadget>, GadgetPersistenceError>;
}

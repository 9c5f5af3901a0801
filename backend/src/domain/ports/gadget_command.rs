//! Driving port for gadget mutations.

use async_trait::async_trait;

use crate::domain::{
    AnnotatedGadget, Error, Gadget, GadgetChanges, GadgetId, GadgetStatus, SelfDestructOutcome,
    UserId,
};

/// Input for [`GadgetCommand::create`].
///
/// `name` is validated by the service so blank names surface as a domain
/// validation error with field details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateGadgetRequest {
    pub owner: UserId,
    pub name: String,
    pub description: Option<String>,
    pub status: Option<GadgetStatus>,
}

/// Input for [`GadgetCommand::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateGadgetRequest {
    pub id: GadgetId,
    pub changes: GadgetChanges,
}

/// Input for [`GadgetCommand::self_destruct`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelfDestructRequest {
    pub id: GadgetId,
    pub confirmation_code: Option<String>,
}

/// Gadget lifecycle use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GadgetCommand: Send + Sync {
    /// Create a gadget with a freshly generated codename.
    async fn create(&self, request: CreateGadgetRequest) -> Result<AnnotatedGadget, Error>;

    /// Apply a partial update.
    async fn update(&self, request: UpdateGadgetRequest) -> Result<AnnotatedGadget, Error>;

    /// Soft-retire a gadget.
    async fn decommission(&self, id: &GadgetId) -> Result<Gadget, Error>;

    /// Run one step of the self-destruct handshake.
    async fn self_destruct(&self, request: SelfDestructRequest)
    -> Result<SelfDestructOutcome, Error>;
}

//! Driving port for gadget reads.

use async_trait::async_trait;

use crate::domain::{Error, GadgetListing, GadgetStatus};

/// Read-side gadget use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GadgetQuery: Send + Sync {
    /// List gadgets newest first, optionally filtered by exact status.
    async fn list(&self, status: Option<GadgetStatus>) -> Result<Vec<GadgetListing>, Error>;
}

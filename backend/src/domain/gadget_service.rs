//! Gadget lifecycle services.
//!
//! [`GadgetService`] implements both gadget driving ports. Time comes from an
//! injected [`Clock`] and every random value from an injected
//! [`GadgetRandomness`], so service behaviour is deterministic under test.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::codename::CODENAME_PRECHECK_ATTEMPTS;
use crate::domain::ports::{
    CreateGadgetRequest, GadgetCommand, GadgetPersistenceError, GadgetQuery, GadgetRandomness,
    GadgetRepository, SelfDestructRequest, UpdateGadgetRequest,
};
use crate::domain::{
    AnnotatedGadget, Codename, ConfirmationCode, Error, Gadget, GadgetDraft, GadgetId,
    GadgetListing, GadgetMutation, GadgetName, GadgetStatus, SelfDestructOutcome,
};

fn map_repository_error(error: GadgetPersistenceError) -> Error {
    match error {
        GadgetPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("gadget repository unavailable: {message}"))
        }
        GadgetPersistenceError::Query { message } => {
            Error::internal(format!("gadget repository error: {message}"))
        }
    }
}

fn not_found(id: &GadgetId) -> Error {
    Error::not_found(format!("gadget {id} not found"))
}

/// Gadget service implementing [`GadgetCommand`] and [`GadgetQuery`].
#[derive(Clone)]
pub struct GadgetService<R> {
    gadget_repo: Arc<R>,
    clock: Arc<dyn Clock>,
    randomness: Arc<dyn GadgetRandomness>,
}

impl<R> GadgetService<R> {
    /// Create a new service.
    pub fn new(
        gadget_repo: Arc<R>,
        clock: Arc<dyn Clock>,
        randomness: Arc<dyn GadgetRandomness>,
    ) -> Self {
        Self {
            gadget_repo,
            clock,
            randomness,
        }
    }

    fn annotate(&self, gadget: Gadget) -> AnnotatedGadget {
        AnnotatedGadget {
            gadget,
            mission_success_probability: self.randomness.mission_success_probability(),
        }
    }
}

impl<R> GadgetService<R>
where
    R: GadgetRepository,
{
    async fn load(&self, id: &GadgetId) -> Result<Gadget, Error> {
        self.gadget_repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found(id))
    }

    async fn write(&self, id: &GadgetId, mutation: &GadgetMutation) -> Result<Gadget, Error> {
        self.gadget_repo
            .apply(id, mutation)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found(id))
    }

    /// Pick a codename not currently in the store.
    ///
    /// Up to [`CODENAME_PRECHECK_ATTEMPTS`] candidates are checked; if all
    /// collide, one further unchecked candidate is returned. The vocabulary
    /// holds 80 codenames, so a full registry repeats them.
    async fn pick_codename(&self) -> Result<Codename, Error> {
        for _ in 0..CODENAME_PRECHECK_ATTEMPTS {
            let candidate = self.randomness.codename();
            let taken = self
                .gadget_repo
                .codename_exists(&candidate)
                .await
                .map_err(map_repository_error)?;
            if !taken {
                return Ok(candidate);
            }
            debug!(codename = %candidate, "codename collision");
        }
        Ok(self.randomness.codename())
    }
}

#[async_trait]
impl<R> GadgetCommand for GadgetService<R>
where
    R: GadgetRepository,
{
    async fn create(&self, request: CreateGadgetRequest) -> Result<AnnotatedGadget, Error> {
        let CreateGadgetRequest {
            owner,
            name,
            description,
            status,
        } = request;
        let name = GadgetName::new(name).map_err(|err| {
            Error::invalid_request(err.to_string())
                .with_details(json!({ "field": "name", "code": "blank_field" }))
        })?;

        let codename = self.pick_codename().await?;
        let now = self.clock.utc();
        let gadget = Gadget::new(GadgetDraft {
            id: GadgetId::random(),
            name,
            codename,
            description,
            status: status.unwrap_or_default(),
            created_by: owner,
            created_at: now,
            updated_at: now,
            decommissioned_at: None,
        });

        self.gadget_repo
            .insert(&gadget)
            .await
            .map_err(map_repository_error)?;
        info!(
            gadget_id = %gadget.id(),
            codename = %gadget.codename(),
            owner = %owner,
            "gadget created"
        );
        Ok(self.annotate(gadget))
    }

    async fn update(&self, request: UpdateGadgetRequest) -> Result<AnnotatedGadget, Error> {
        let UpdateGadgetRequest { id, changes } = request;
        self.load(&id).await?;
        if changes.is_empty() {
            return Err(Error::invalid_request("no fields to update"));
        }

        let mutation = GadgetMutation::update(changes, self.clock.utc());
        let gadget = self.write(&id, &mutation).await?;
        info!(gadget_id = %id, status = %gadget.status(), "gadget updated");
        Ok(self.annotate(gadget))
    }

    async fn decommission(&self, id: &GadgetId) -> Result<Gadget, Error> {
        self.load(id).await?;
        let gadget = self
            .write(id, &GadgetMutation::decommission(self.clock.utc()))
            .await?;
        info!(gadget_id = %id, "gadget decommissioned");
        Ok(gadget)
    }

    async fn self_destruct(
        &self,
        request: SelfDestructRequest,
    ) -> Result<SelfDestructOutcome, Error> {
        let SelfDestructRequest {
            id,
            confirmation_code,
        } = request;
        let current = self.load(&id).await?;
        if current.status() == GadgetStatus::Destroyed {
            return Err(Error::conflict("gadget already destroyed"));
        }

        // An empty code is treated the same as an absent one.
        let Some(raw_code) = confirmation_code.filter(|code| !code.is_empty()) else {
            debug!(gadget_id = %id, "self-destruct challenge issued");
            return Ok(SelfDestructOutcome::ChallengeIssued {
                confirmation_code: self.randomness.confirmation_code(),
            });
        };
        let confirmation_code = ConfirmationCode::parse(&raw_code).map_err(|err| {
            Error::invalid_request(err.to_string())
                .with_details(json!({ "field": "confirmationCode", "code": "invalid_format" }))
        })?;

        let destruction_time = self.clock.utc();
        let gadget = self
            .write(&id, &GadgetMutation::destroy(destruction_time))
            .await?;
        warn!(gadget_id = %id, codename = %gadget.codename(), "gadget self-destructed");
        Ok(SelfDestructOutcome::Destroyed {
            gadget,
            destruction_time,
            confirmation_code,
        })
    }
}

#[async_trait]
impl<R> GadgetQuery for GadgetService<R>
where
    R: GadgetRepository,
{
    async fn list(&self, status: Option<GadgetStatus>) -> Result<Vec<GadgetListing>, Error> {
        let rows = self
            .gadget_repo
            .list(status)
            .await
            .map_err(map_repository_error)?;
        Ok(rows
            .into_iter()
            .map(|row| GadgetListing {
                gadget: row.gadget,
                creator_email: row.creator_email,
                mission_success_probability: self.randomness.mission_success_probability(),
            })
            .collect())
    }
}

#[cfg(test)]
#[path = "gadget_service_tests.rs"]
mod tests;

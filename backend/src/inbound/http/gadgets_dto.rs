//! Request and response payloads for the gadget endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::ports::{CreateGadgetRequest, UpdateGadgetRequest};
use crate::domain::{
    AnnotatedGadget, Error, Gadget, GadgetChanges, GadgetId, GadgetListing, GadgetName,
    GadgetStatus, UserId,
};
use crate::inbound::http::schemas::GadgetStatusSchema;
use crate::inbound::http::validation::{
    FieldName, blank_field_error, parse_status, require_text,
};

pub(crate) const NAME_FIELD: FieldName = FieldName::new("name");
pub(crate) const STATUS_FIELD: FieldName = FieldName::new("status");

/// Distinguish an explicit `null` from an absent field.
///
/// Used with `#[serde(default)]`: absent stays `None`, `null` becomes
/// `Some(None)`.
fn deserialize_some<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn parse_optional_status(raw: Option<String>) -> Result<Option<GadgetStatus>, Error> {
    raw.map(|value| parse_status(&value, STATUS_FIELD))
        .transpose()
}

/// Query string for `GET /api/gadgets`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListGadgetsQuery {
    /// Exact status to filter by.
    #[param(example = "Deployed")]
    pub status: Option<String>,
}

impl ListGadgetsQuery {
    pub(crate) fn status_filter(self) -> Result<Option<GadgetStatus>, Error> {
        parse_optional_status(self.status)
    }
}

/// Body for `POST /api/gadgets`.
///
/// Example JSON: `{"name":"Exploding pen","status":"Deployed"}`
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGadgetBody {
    #[schema(example = "Exploding pen")]
    pub name: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<GadgetStatusSchema>)]
    pub status: Option<String>,
}

impl CreateGadgetBody {
    pub(crate) fn into_request(self, owner: UserId) -> Result<CreateGadgetRequest, Error> {
        let name = require_text(self.name, NAME_FIELD)?;
        let status = parse_optional_status(self.status)?;
        Ok(CreateGadgetRequest {
            owner,
            name,
            description: self.description,
            status,
        })
    }
}

/// Body for `PATCH /api/gadgets/{id}`.
///
/// Only present fields are applied. `"description": null` clears the
/// description.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGadgetBody {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[schema(value_type = Option<GadgetStatusSchema>)]
    pub status: Option<String>,
}

impl UpdateGadgetBody {
    pub(crate) fn into_request(self, id: GadgetId) -> Result<UpdateGadgetRequest, Error> {
        let name = self
            .name
            .map(|raw| GadgetName::new(raw).map_err(|_| blank_field_error(NAME_FIELD)))
            .transpose()?;
        let status = parse_optional_status(self.status)?;
        Ok(UpdateGadgetRequest {
            id,
            changes: GadgetChanges {
                name,
                description: self.description,
                status,
            },
        })
    }
}

/// Body for `POST /api/gadgets/{id}/self-destruct`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SelfDestructBody {
    /// Eight uppercase letters or digits. Omit to receive a challenge.
    #[schema(example = "AB12CD34")]
    pub confirmation_code: Option<String>,
}

/// Gadget record as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GadgetBody {
    pub id: Uuid,
    #[schema(example = "Exploding pen")]
    pub name: String,
    #[schema(example = "Agent Falcon")]
    pub codename: String,
    pub description: Option<String>,
    #[schema(value_type = GadgetStatusSchema)]
    pub status: GadgetStatus,
    #[schema(example = 42)]
    pub created_by_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub decommissioned_at: Option<DateTime<Utc>>,
    /// Randomised on every response; never stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(minimum = 70, maximum = 100)]
    pub mission_success_probability: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator_email: Option<String>,
}

impl From<&Gadget> for GadgetBody {
    fn from(gadget: &Gadget) -> Self {
        Self {
            id: *gadget.id().as_uuid(),
            name: gadget.name().as_ref().to_owned(),
            codename: gadget.codename().to_string(),
            description: gadget.description().map(str::to_owned),
            status: gadget.status(),
            created_by_id: gadget.created_by().get(),
            created_at: gadget.created_at(),
            updated_at: gadget.updated_at(),
            decommissioned_at: gadget.decommissioned_at(),
            mission_success_probability: None,
            creator_email: None,
        }
    }
}

impl From<AnnotatedGadget> for GadgetBody {
    fn from(value: AnnotatedGadget) -> Self {
        Self {
            mission_success_probability: Some(value.mission_success_probability.get()),
            ..Self::from(&value.gadget)
        }
    }
}

impl From<GadgetListing> for GadgetBody {
    fn from(value: GadgetListing) -> Self {
        Self {
            mission_success_probability: Some(value.mission_success_probability.get()),
            creator_email: value.creator_email.map(String::from),
            ..Self::from(&value.gadget)
        }
    }
}

/// Response for `GET /api/gadgets`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GadgetListResponse {
    #[schema(example = "Gadgets retrieved successfully")]
    pub message: String,
    pub count: usize,
    pub gadgets: Vec<GadgetBody>,
}

/// Single-gadget response used by create, update and decommission.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GadgetResponse {
    #[schema(example = "Gadget created successfully")]
    pub message: String,
    pub gadget: GadgetBody,
}

/// Successful self-destruct.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SelfDestructResponse {
    #[schema(example = "Self-destruct sequence completed for Agent Falcon")]
    pub message: String,
    pub gadget: GadgetBody,
    pub destruction_time: DateTime<Utc>,
    #[schema(example = "AB12CD34")]
    pub confirmation_code: String,
}

/// Challenge returned (with HTTP 400) when no confirmation code was sent.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SelfDestructChallenge {
    #[schema(example = "Confirmation code required for self-destruct sequence")]
    pub message: String,
    #[schema(example = "ZX81QL07")]
    pub confirmation_code: String,
    pub warning: String,
}

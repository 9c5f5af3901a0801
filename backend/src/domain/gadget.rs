//! Gadget aggregate, lifecycle states and partial-update model.
//!
//! A gadget is created `Available` and may be moved to any status by an
//! explicit update. Decommission and self-destruct are expressed as
//! [`GadgetMutation`] values so every write path shares one persistence
//! contract.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Email, UserId};

/// Validation errors raised by gadget value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GadgetValidationError {
    EmptyName,
    EmptyCodename,
    UnknownStatus { value: String },
    ProbabilityOutOfRange { value: u8 },
}

impl fmt::Display for GadgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "gadget name must not be empty"),
            Self::EmptyCodename => write!(f, "gadget codename must not be empty"),
            Self::UnknownStatus { value } => write!(
                f,
                "status must be one of Available, Deployed, Destroyed, Decommissioned (got '{value}')"
            ),
            Self::ProbabilityOutOfRange { value } => write!(
                f,
                "mission success probability must lie in [{}, {}] (got {value})",
                MissionSuccessProbability::MIN,
                MissionSuccessProbability::MAX
            ),
        }
    }
}

impl std::error::Error for GadgetValidationError {}

/// Stable gadget identifier (UUID v4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GadgetId(Uuid);

impl GadgetId {
    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for GadgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of a gadget.
///
/// The string forms are the exact wire and column values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GadgetStatus {
    #[default]
    Available,
    Deployed,
    Destroyed,
    Decommissioned,
}

impl GadgetStatus {
    /// All statuses in declaration order.
    pub const ALL: [Self; 4] = [
        Self::Available,
        Self::Deployed,
        Self::Destroyed,
        Self::Decommissioned,
    ];

    /// Canonical string form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Deployed => "Deployed",
            Self::Destroyed => "Destroyed",
            Self::Decommissioned => "Decommissioned",
        }
    }
}

impl fmt::Display for GadgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GadgetStatus {
    type Err = GadgetValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| GadgetValidationError::UnknownStatus {
                value: s.to_owned(),
            })
    }
}

/// Human-readable gadget name. Must not be blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GadgetName(String);

impl GadgetName {
    /// Validate and construct a [`GadgetName`].
    pub fn new(name: impl Into<String>) -> Result<Self, GadgetValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(GadgetValidationError::EmptyName);
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for GadgetName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<GadgetName> for String {
    fn from(value: GadgetName) -> Self {
        value.0
    }
}

impl TryFrom<String> for GadgetName {
    type Error = GadgetValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// System-generated display name such as `Operation Kraken`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Codename(pub(super) String);

impl Codename {
    /// Validate and construct a [`Codename`].
    pub fn new(codename: impl Into<String>) -> Result<Self, GadgetValidationError> {
        let codename = codename.into();
        if codename.trim().is_empty() {
            return Err(GadgetValidationError::EmptyCodename);
        }
        Ok(Self(codename))
    }
}

impl AsRef<str> for Codename {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Codename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Codename> for String {
    fn from(value: Codename) -> Self {
        value.0
    }
}

impl TryFrom<String> for Codename {
    type Error = GadgetValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Ephemeral flavour percentage attached to gadget reads. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct MissionSuccessProbability(u8);

impl MissionSuccessProbability {
    /// Inclusive lower bound.
    pub const MIN: u8 = 70;
    /// Inclusive upper bound.
    pub const MAX: u8 = 100;

    /// Validate and construct a probability.
    pub fn new(value: u8) -> Result<Self, GadgetValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(GadgetValidationError::ProbabilityOutOfRange { value });
        }
        Ok(Self(value))
    }

    /// Draw a probability uniformly from the allowed range.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen_range(Self::MIN..=Self::MAX))
    }

    /// Percentage value.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl From<MissionSuccessProbability> for u8 {
    fn from(value: MissionSuccessProbability) -> Self {
        value.0
    }
}

impl TryFrom<u8> for MissionSuccessProbability {
    type Error = GadgetValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Input bundle for [`Gadget::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GadgetDraft {
    pub id: GadgetId,
    pub name: GadgetName,
    pub codename: Codename,
    pub description: Option<String>,
    pub status: GadgetStatus,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub decommissioned_at: Option<DateTime<Utc>>,
}

/// Gadget aggregate.
///
/// ## Invariants
/// - `name` and `codename` are non-blank.
/// - `decommissioned_at` is only ever set by a decommission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gadget {
    id: GadgetId,
    name: GadgetName,
    codename: Codename,
    description: Option<String>,
    status: GadgetStatus,
    created_by: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    decommissioned_at: Option<DateTime<Utc>>,
}

impl Gadget {
    /// Build a gadget from validated parts.
    pub fn new(draft: GadgetDraft) -> Self {
        let GadgetDraft {
            id,
            name,
            codename,
            description,
            status,
            created_by,
            created_at,
            updated_at,
            decommissioned_at,
        } = draft;
        Self {
            id,
            name,
            codename,
            description,
            status,
            created_by,
            created_at,
            updated_at,
            decommissioned_at,
        }
    }

    pub fn id(&self) -> GadgetId {
        self.id
    }

    pub fn name(&self) -> &GadgetName {
        &self.name
    }

    pub fn codename(&self) -> &Codename {
        &self.codename
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn status(&self) -> GadgetStatus {
        self.status
    }

    /// Owning user.
    pub fn created_by(&self) -> UserId {
        self.created_by
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn decommissioned_at(&self) -> Option<DateTime<Utc>> {
        self.decommissioned_at
    }

    /// Return a copy of this gadget with `mutation` applied.
    ///
    /// Persistence adapters that cannot push the mutation down to storage
    /// (such as in-memory stores) use this to stay consistent with the SQL
    /// adapter.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use gadget_registry::domain::{
    ///     Codename, Gadget, GadgetDraft, GadgetId, GadgetMutation, GadgetName, GadgetStatus,
    ///     UserId,
    /// };
    ///
    /// let now = Utc::now();
    /// let gadget = Gadget::new(GadgetDraft {
    ///     id: GadgetId::random(),
    ///     name: GadgetName::new("Exploding gum").unwrap(),
    ///     codename: Codename::new("Agent Viper").unwrap(),
    ///     description: None,
    ///     status: GadgetStatus::Available,
    ///     created_by: UserId::new(1).unwrap(),
    ///     created_at: now,
    ///     updated_at: now,
    ///     decommissioned_at: None,
    /// });
    /// let retired = gadget.with_mutation(&GadgetMutation::decommission(now));
    /// assert_eq!(retired.status(), GadgetStatus::Decommissioned);
    /// assert_eq!(retired.decommissioned_at(), Some(now));
    /// ```
    #[must_use]
    pub fn with_mutation(&self, mutation: &GadgetMutation) -> Self {
        let mut next = self.clone();
        let GadgetChanges {
            name,
            description,
            status,
        } = &mutation.changes;
        if let Some(name) = name {
            next.name = name.clone();
        }
        if let Some(description) = description {
            next.description = description.clone();
        }
        if let Some(status) = status {
            next.status = *status;
        }
        if let Some(at) = mutation.decommissioned_at {
            next.decommissioned_at = Some(at);
        }
        next.updated_at = mutation.updated_at;
        next
    }
}

/// Explicit partial update: `None` leaves a field untouched.
///
/// `description` is doubly optional so callers can distinguish "not
/// provided" (`None`) from "clear it" (`Some(None)`) and "set it"
/// (`Some(Some(_))`, including the empty string).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GadgetChanges {
    pub name: Option<GadgetName>,
    pub description: Option<Option<String>>,
    pub status: Option<GadgetStatus>,
}

impl GadgetChanges {
    /// True when no field would be written.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.status.is_none()
    }
}

/// A write against an existing gadget row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GadgetMutation {
    pub changes: GadgetChanges,
    pub updated_at: DateTime<Utc>,
    pub decommissioned_at: Option<DateTime<Utc>>,
}

impl GadgetMutation {
    /// Caller-supplied partial update.
    pub fn update(changes: GadgetChanges, now: DateTime<Utc>) -> Self {
        Self {
            changes,
            updated_at: now,
            decommissioned_at: None,
        }
    }

    /// Soft retirement; stamps `decommissioned_at`.
    pub fn decommission(now: DateTime<Utc>) -> Self {
        Self {
            changes: GadgetChanges {
                status: Some(GadgetStatus::Decommissioned),
                ..GadgetChanges::default()
            },
            updated_at: now,
            decommissioned_at: Some(now),
        }
    }

    /// Completed self-destruct.
    pub fn destroy(now: DateTime<Utc>) -> Self {
        Self {
            changes: GadgetChanges {
                status: Some(GadgetStatus::Destroyed),
                ..GadgetChanges::default()
            },
            updated_at: now,
            decommissioned_at: None,
        }
    }
}

/// Gadget together with its per-read probability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedGadget {
    pub gadget: Gadget,
    pub mission_success_probability: MissionSuccessProbability,
}

/// Gadget row joined with its creator, as read by listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GadgetWithCreator {
    pub gadget: Gadget,
    pub creator_email: Option<Email>,
}

/// Listing entry returned to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GadgetListing {
    pub gadget: Gadget,
    pub creator_email: Option<Email>,
    pub mission_success_probability: MissionSuccessProbability,
}

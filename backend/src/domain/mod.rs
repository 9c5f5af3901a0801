//! Domain primitives, aggregates and services.
//!
//! Purpose: define strongly typed entities used by the API and persistence
//! layers, plus the services that own gadget lifecycle and account rules.
//! Types are immutable once built and document their invariants in Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, Email, UserId: account identity.
//! - Credentials, AuthenticatedUser, BearerToken, AuthSession: auth flow.
//! - Gadget and friends: the gadget aggregate and its partial-update model.
//! - ConfirmationCode, SelfDestructOutcome: self-destruct handshake.
//! - AuthService, GadgetService: driving port implementations.

pub mod auth;
pub mod auth_service;
pub mod codename;
pub mod error;
pub mod gadget;
pub mod gadget_service;
pub mod ports;
pub mod self_destruct;
pub mod trace_id;
pub mod user;

pub use self::auth::{
    AuthSession, AuthenticatedUser, BearerToken, Credentials, CredentialsValidationError,
};
pub use self::auth_service::AuthService;
pub use self::codename::{CODENAME_NOUNS, CODENAME_PREFIXES};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::gadget::{
    AnnotatedGadget, Codename, Gadget, GadgetChanges, GadgetDraft, GadgetId, GadgetListing,
    GadgetMutation, GadgetName, GadgetStatus, GadgetValidationError, GadgetWithCreator,
    MissionSuccessProbability,
};
pub use self::gadget_service::GadgetService;
pub use self::self_destruct::{ConfirmationCode, ConfirmationCodeError, SelfDestructOutcome};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{Email, StoredCredentials, User, UserId, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use gadget_registry::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("no such gadget"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;

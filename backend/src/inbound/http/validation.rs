//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every helper produces an `invalid_request` error whose `details` carry the
//! offending `field`, a machine-readable `code` and, where useful, the
//! rejected `value`.

use actix_web::{HttpRequest, error::JsonPayloadError, error::QueryPayloadError, web};
use serde_json::json;
use uuid::Uuid;

use crate::domain::{Error, GadgetId, GadgetStatus};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    MissingField,
    BlankField,
    InvalidUuid,
    InvalidStatus,
    MalformedBody,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::BlankField => "blank_field",
            Self::InvalidUuid => "invalid_uuid",
            Self::InvalidStatus => "invalid_status",
            Self::MalformedBody => "malformed_body",
        }
    }
}

/// HTTP field name as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, code: ValidationCode, message: String) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

fn field_value_error(field: FieldName, code: ValidationCode, message: String, value: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(
        field,
        ValidationCode::MissingField,
        format!("missing required field: {name}"),
    )
}

pub(crate) fn blank_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(
        field,
        ValidationCode::BlankField,
        format!("{name} must not be blank"),
    )
}

/// Require a present, non-blank string field.
pub(crate) fn require_text(value: Option<String>, field: FieldName) -> Result<String, Error> {
    match value {
        None => Err(missing_field_error(field)),
        Some(text) if text.trim().is_empty() => Err(blank_field_error(field)),
        Some(text) => Ok(text),
    }
}

/// Require a present, non-empty string field; whitespace is kept as given.
pub(crate) fn require_present(value: Option<String>, field: FieldName) -> Result<String, Error> {
    match value {
        None => Err(missing_field_error(field)),
        Some(text) if text.is_empty() => Err(blank_field_error(field)),
        Some(text) => Ok(text),
    }
}

pub(crate) fn parse_gadget_id(value: &str, field: FieldName) -> Result<GadgetId, Error> {
    Uuid::parse_str(value)
        .map(GadgetId::from_uuid)
        .map_err(|_| {
            let name = field.as_str();
            field_value_error(
                field,
                ValidationCode::InvalidUuid,
                format!("{name} must be a valid UUID"),
                value,
            )
        })
}

pub(crate) fn parse_status(value: &str, field: FieldName) -> Result<GadgetStatus, Error> {
    value.parse::<GadgetStatus>().map_err(|err| {
        field_value_error(field, ValidationCode::InvalidStatus, err.to_string(), value)
    })
}

fn malformed(kind: &str, detail: String) -> Error {
    Error::invalid_request(format!("malformed {kind}: {detail}")).with_details(json!({
        "code": ValidationCode::MalformedBody.as_str(),
    }))
}

/// JSON extractor configuration reporting parse failures as domain errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        malformed("JSON body", err.to_string()).into()
    })
}

/// Query-string extractor configuration reporting parse failures as domain
/// errors.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: QueryPayloadError, _req: &HttpRequest| {
        malformed("query string", err.to_string()).into()
    })
}

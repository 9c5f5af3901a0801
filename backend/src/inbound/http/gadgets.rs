//! Gadget API handlers.
//!
//! ```text
//! GET    /api/gadgets?status=Deployed
//! POST   /api/gadgets {"name":"Exploding pen"}
//! PATCH  /api/gadgets/{id} {"description":null}
//! DELETE /api/gadgets/{id}
//! POST   /api/gadgets/{id}/self-destruct {"confirmationCode":"AB12CD34"}
//! ```
//!
//! Every handler requires a verified bearer token.

use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde_json::json;

use crate::domain::ports::SelfDestructRequest;
use crate::domain::{Error, GadgetId, SelfDestructOutcome};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::BearerAuth;
use crate::inbound::http::gadgets_dto::{
    CreateGadgetBody, GadgetBody, GadgetListResponse, GadgetResponse, ListGadgetsQuery,
    SelfDestructBody, SelfDestructChallenge, SelfDestructResponse, UpdateGadgetBody,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_gadget_id};

const ID_FIELD: FieldName = FieldName::new("id");
const CHALLENGE_WARNING: &str = "This code will be required to proceed with destruction";

fn gadget_id(path: web::Path<String>) -> Result<GadgetId, Error> {
    parse_gadget_id(&path.into_inner(), ID_FIELD)
}

/// Parse the optional self-destruct body. An empty body counts as no code.
fn self_destruct_body(bytes: &[u8]) -> Result<SelfDestructBody, Error> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(SelfDestructBody::default());
    }
    serde_json::from_slice(bytes).map_err(|err| {
        Error::invalid_request(format!("malformed JSON body: {err}"))
            .with_details(json!({ "code": "malformed_body" }))
    })
}

/// List gadgets, newest first.
#[utoipa::path(
    get,
    path = "/api/gadgets",
    params(ListGadgetsQuery),
    responses(
        (status = 200, description = "Gadgets", body = GadgetListResponse),
        (status = 400, description = "Unknown status filter", body = ErrorSchema),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["gadgets"],
    operation_id = "listGadgets"
)]
#[get("")]
pub async fn list_gadgets(
    state: web::Data<HttpState>,
    _caller: BearerAuth,
    query: web::Query<ListGadgetsQuery>,
) -> ApiResult<web::Json<GadgetListResponse>> {
    let status = query.into_inner().status_filter()?;
    let gadgets: Vec<GadgetBody> = state
        .gadgets_query
        .list(status)
        .await?
        .into_iter()
        .map(GadgetBody::from)
        .collect();
    Ok(web::Json(GadgetListResponse {
        message: "Gadgets retrieved successfully".to_owned(),
        count: gadgets.len(),
        gadgets,
    }))
}

/// Register a gadget owned by the caller. A codename is assigned.
#[utoipa::path(
    post,
    path = "/api/gadgets",
    request_body = CreateGadgetBody,
    responses(
        (status = 201, description = "Gadget created", body = GadgetResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorSchema),
        (status = 409, description = "No free codename", body = ErrorSchema)
    ),
    tags = ["gadgets"],
    operation_id = "createGadget"
)]
#[post("")]
pub async fn create_gadget(
    state: web::Data<HttpState>,
    caller: BearerAuth,
    payload: web::Json<CreateGadgetBody>,
) -> ApiResult<HttpResponse> {
    let request = payload.into_inner().into_request(caller.into_inner().user_id)?;
    let created = state.gadgets.create(request).await?;
    Ok(HttpResponse::Created().json(GadgetResponse {
        message: "Gadget created successfully".to_owned(),
        gadget: created.into(),
    }))
}

/// Apply a partial update.
#[utoipa::path(
    patch,
    path = "/api/gadgets/{id}",
    params(("id" = String, Path, description = "Gadget UUID")),
    request_body = UpdateGadgetBody,
    responses(
        (status = 200, description = "Gadget updated", body = GadgetResponse),
        (status = 400, description = "Invalid or empty update", body = ErrorSchema),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorSchema),
        (status = 404, description = "Gadget not found", body = ErrorSchema)
    ),
    tags = ["gadgets"],
    operation_id = "updateGadget"
)]
#[patch("/{id}")]
pub async fn update_gadget(
    state: web::Data<HttpState>,
    _caller: BearerAuth,
    path: web::Path<String>,
    payload: web::Json<UpdateGadgetBody>,
) -> ApiResult<web::Json<GadgetResponse>> {
    let id = gadget_id(path)?;
    let request = payload.into_inner().into_request(id)?;
    let updated = state.gadgets.update(request).await?;
    Ok(web::Json(GadgetResponse {
        message: "Gadget updated successfully".to_owned(),
        gadget: updated.into(),
    }))
}

/// Decommission a gadget. The record is kept.
#[utoipa::path(
    delete,
    path = "/api/gadgets/{id}",
    params(("id" = String, Path, description = "Gadget UUID")),
    responses(
        (status = 200, description = "Gadget decommissioned", body = GadgetResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorSchema),
        (status = 404, description = "Gadget not found", body = ErrorSchema)
    ),
    tags = ["gadgets"],
    operation_id = "decommissionGadget"
)]
#[delete("/{id}")]
pub async fn decommission_gadget(
    state: web::Data<HttpState>,
    _caller: BearerAuth,
    path: web::Path<String>,
) -> ApiResult<web::Json<GadgetResponse>> {
    let id = gadget_id(path)?;
    let gadget = state.gadgets.decommission(&id).await?;
    Ok(web::Json(GadgetResponse {
        message: "Gadget decommissioned successfully".to_owned(),
        gadget: GadgetBody::from(&gadget),
    }))
}

/// Two-step destruction.
///
/// Without a code the response is a 400 challenge carrying a fresh code. Any
/// well-formed code then destroys the gadget.
#[utoipa::path(
    post,
    path = "/api/gadgets/{id}/self-destruct",
    params(("id" = String, Path, description = "Gadget UUID")),
    request_body(content = SelfDestructBody, description = "Omit the code to request a challenge"),
    responses(
        (status = 200, description = "Gadget destroyed", body = SelfDestructResponse),
        (status = 400, description = "Challenge issued", body = SelfDestructChallenge),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorSchema),
        (status = 404, description = "Gadget not found", body = ErrorSchema),
        (status = 409, description = "Gadget already destroyed", body = ErrorSchema)
    ),
    tags = ["gadgets"],
    operation_id = "selfDestructGadget"
)]
#[post("/{id}/self-destruct")]
pub async fn self_destruct_gadget(
    state: web::Data<HttpState>,
    _caller: BearerAuth,
    path: web::Path<String>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let id = gadget_id(path)?;
    let SelfDestructBody { confirmation_code } = self_destruct_body(&body)?;
    let outcome = state
        .gadgets
        .self_destruct(SelfDestructRequest {
            id,
            confirmation_code,
        })
        .await?;

    Ok(match outcome {
        SelfDestructOutcome::ChallengeIssued { confirmation_code } => {
            HttpResponse::BadRequest().json(SelfDestructChallenge {
                message: "Confirmation code required for self-destruct sequence".to_owned(),
                confirmation_code: confirmation_code.to_string(),
                warning: CHALLENGE_WARNING.to_owned(),
            })
        }
        SelfDestructOutcome::Destroyed {
            gadget,
            destruction_time,
            confirmation_code,
        } => HttpResponse::Ok().json(SelfDestructResponse {
            message: format!("Self-destruct sequence completed for {}", gadget.codename()),
            gadget: GadgetBody::from(&gadget),
            destruction_time,
            confirmation_code: confirmation_code.to_string(),
        }),
    })
}

/// Register every gadget handler under `/api/gadgets`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/gadgets")
            .service(list_gadgets)
            .service(create_gadget)
            .service(update_gadget)
            .service(decommission_gadget)
            .service(self_destruct_gadget),
    );
}

#[cfg(test)]
#[path = "gadgets_tests.rs"]
mod tests;

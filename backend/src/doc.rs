//! OpenAPI document for the REST API.
//!
//! Served by Swagger UI in debug builds and printed by the `openapi-dump`
//! binary.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::auth::{AuthResponse, CredentialsRequest};
use crate::inbound::http::gadgets_dto::{
    CreateGadgetBody, GadgetBody, GadgetListResponse, GadgetResponse, SelfDestructBody,
    SelfDestructChallenge, SelfDestructResponse, UpdateGadgetBody,
};
use crate::inbound::http::health::{HealthSummary, ServiceStatus};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, GadgetStatusSchema, UserSchema};

/// Name of the bearer security scheme in the document.
pub const BEARER_SCHEME: &str = "BearerAuth";

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token issued by POST /api/auth/signup or /api/auth/login."))
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Gadget registry API",
        description = "Bearer-authenticated gadget inventory with a two-step self-destruct."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerAuth" = [])),
    paths(
        crate::inbound::http::auth::signup,
        crate::inbound::http::auth::login,
        crate::inbound::http::gadgets::list_gadgets,
        crate::inbound::http::gadgets::create_gadget,
        crate::inbound::http::gadgets::update_gadget,
        crate::inbound::http::gadgets::decommission_gadget,
        crate::inbound::http::gadgets::self_destruct_gadget,
        crate::inbound::http::health::root,
        crate::inbound::http::health::health_summary,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        UserSchema,
        GadgetStatusSchema,
        CredentialsRequest,
        AuthResponse,
        GadgetBody,
        CreateGadgetBody,
        UpdateGadgetBody,
        SelfDestructBody,
        GadgetListResponse,
        GadgetResponse,
        SelfDestructResponse,
        SelfDestructChallenge,
        ServiceStatus,
        HealthSummary,
    )),
    tags(
        (name = "auth", description = "Account signup and login"),
        (name = "gadgets", description = "Gadget lifecycle"),
        (name = "health", description = "Service status and orchestration probes")
    )
)]
pub struct ApiDoc;

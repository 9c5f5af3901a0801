//! Account API handlers.
//!
//! ```text
//! POST /api/auth/signup {"email":"ethan@imf.gov","password":"mission"}
//! POST /api/auth/login  {"email":"ethan@imf.gov","password":"mission"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{AuthSession, Credentials, CredentialsValidationError, Error, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, UserSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, blank_field_error, require_present, require_text,
};

const EMAIL_FIELD: FieldName = FieldName::new("email");
const PASSWORD_FIELD: FieldName = FieldName::new("password");

/// Email and password body shared by signup and login.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsRequest {
    #[schema(example = "ethan@imf.gov")]
    pub email: Option<String>,
    #[schema(example = "mission")]
    pub password: Option<String>,
}

impl TryFrom<CredentialsRequest> for Credentials {
    type Error = Error;

    fn try_from(value: CredentialsRequest) -> Result<Self, Self::Error> {
        let email = require_text(value.email, EMAIL_FIELD)?;
        let password = require_present(value.password, PASSWORD_FIELD)?;
        Credentials::try_from_parts(&email, &password).map_err(|err| match err {
            CredentialsValidationError::EmptyEmail => blank_field_error(EMAIL_FIELD),
            CredentialsValidationError::EmptyPassword => blank_field_error(PASSWORD_FIELD),
        })
    }
}

/// Token and account returned by signup and login.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[schema(example = "Login successful")]
    pub message: String,
    #[schema(value_type = UserSchema)]
    pub user: User,
    /// HS256 bearer token valid for 24 hours by default.
    pub token: String,
}

impl AuthResponse {
    fn new(message: &str, session: AuthSession) -> Self {
        Self {
            message: message.to_owned(),
            user: session.user,
            token: session.token.into(),
        }
    }
}

/// Register an account and issue a bearer token.
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = CredentialsRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Missing or blank field", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "signup",
    security([])
)]
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = Credentials::try_from(payload.into_inner())?;
    let session = state.auth.signup(&credentials).await?;
    Ok(HttpResponse::Created().json(AuthResponse::new("User created successfully", session)))
}

/// Exchange credentials for a bearer token.
///
/// Unknown emails and wrong passwords produce the same 401.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Login success", body = AuthResponse),
        (status = 400, description = "Missing or blank field", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = Credentials::try_from(payload.into_inner())?;
    let session = state.auth.login(&credentials).await?;
    Ok(HttpResponse::Ok().json(AuthResponse::new("Login successful", session)))
}

//! Bearer-token request gate.
//!
//! Handlers that take a [`BearerAuth`] argument only run for requests whose
//! `Authorization: Bearer <token>` header verifies through the
//! [`AuthCommand`](crate::domain::ports::AuthCommand) port.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};

use crate::domain::{AuthenticatedUser, Error};
use crate::inbound::http::state::HttpState;

const BEARER_SCHEME: &str = "bearer";

/// Identity of the caller, recovered from a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerAuth(pub AuthenticatedUser);

impl BearerAuth {
    pub fn into_inner(self) -> AuthenticatedUser {
        self.0
    }
}

/// Pull the token out of an `Authorization` header value.
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case(BEARER_SCHEME) && !token.is_empty()).then_some(token)
}

fn authenticate(req: &HttpRequest) -> Result<BearerAuth, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HTTP state is not configured"))?;
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("authentication required"))?;
    let token = header
        .to_str()
        .ok()
        .and_then(bearer_token)
        .ok_or_else(|| Error::unauthorized("authorization header must use the Bearer scheme"))?;
    state.auth.verify_token(token).map(BearerAuth)
}

impl FromRequest for BearerAuth {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test as actix_test};
    use rstest::rstest;
    use serde_json::Value;

    use super::*;
    use crate::domain::ports::MockAuthCommand;
    use crate::domain::{Email, UserId};
    use crate::inbound::http::test_utils::state_with_auth;

    #[rstest]
    #[case("Bearer abc", Some("abc"))]
    #[case("bearer abc", Some("abc"))]
    #[case("Bearer   abc ", Some("abc"))]
    #[case("Bearer ", None)]
    #[case("Basic abc", None)]
    #[case("abc", None)]
    fn header_parsing(#[case] header: &str, #[case] expected: Option<&str>) {
        assert_eq!(bearer_token(header), expected);
    }

    async fn call(auth: MockAuthCommand, header: Option<&str>) -> (StatusCode, Value) {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state_with_auth(auth)))
                .route(
                    "/whoami",
                    web::get().to(|caller: BearerAuth| async move {
                        HttpResponse::Ok().body(caller.into_inner().user_id.to_string())
                    }),
                ),
        )
        .await;
        let mut request = actix_test::TestRequest::get().uri("/whoami");
        if let Some(value) = header {
            request = request.insert_header((AUTHORIZATION, value.to_owned()));
        }
        let response = actix_test::call_service(&app, request.to_request()).await;
        let status = response.status();
        let body = actix_test::read_body(response).await;
        let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, value)
    }

    #[rstest]
    #[actix_web::test]
    async fn missing_header_is_unauthorised() {
        let mut auth = MockAuthCommand::new();
        auth.expect_verify_token().times(0);

        let (status, body) = call(auth, None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "unauthorized");
    }

    #[rstest]
    #[actix_web::test]
    async fn rejected_token_is_unauthorised() {
        let mut auth = MockAuthCommand::new();
        auth.expect_verify_token()
            .return_once(|_| Err(Error::unauthorized("invalid token")));

        let (status, body) = call(auth, Some("Bearer forged")).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "invalid token");
    }

    #[rstest]
    #[actix_web::test]
    async fn verified_token_reaches_handler() {
        let mut auth = MockAuthCommand::new();
        auth.expect_verify_token()
            .withf(|token| token == "good")
            .return_once(|_| {
                Ok(AuthenticatedUser {
                    user_id: UserId::new(9).expect("user id"),
                    email: Email::new("ilsa@imf.gov").expect("email"),
                })
            });

        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state_with_auth(auth)))
                .route(
                    "/whoami",
                    web::get().to(|caller: BearerAuth| async move {
                        HttpResponse::Ok().body(caller.into_inner().user_id.to_string())
                    }),
                ),
        )
        .await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/whoami")
                .insert_header((AUTHORIZATION, "Bearer good"))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(actix_test::read_body(response).await, "9");
    }
}

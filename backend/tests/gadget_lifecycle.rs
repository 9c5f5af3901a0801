//! End-to-end HTTP flows over the real services with in-memory repositories.

use std::collections::HashSet;
use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use chrono::{DateTime, Utc};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use gadget_registry::Trace;
use gadget_registry::domain::ports::{FixturePasswordHasher, ThreadRngGadgetRandomness};
use gadget_registry::domain::{
    AuthService, CODENAME_NOUNS, CODENAME_PREFIXES, GadgetId, GadgetService, GadgetStatus,
    TRACE_ID_HEADER,
};
use gadget_registry::inbound::http::configure_api;
use gadget_registry::inbound::http::state::HttpState;
use gadget_registry::inbound::http::validation::{json_config, query_config};
use gadget_registry::outbound::security::{DEFAULT_TOKEN_TTL, JwtTokenCodec};

mod support;

use support::in_memory::InMemoryStore;

const SECRET: &[u8] = b"integration-test-signing-secret";

struct Harness {
    store: InMemoryStore,
}

struct Reply {
    status: StatusCode,
    body: Value,
    has_trace_id: bool,
}

impl Harness {
    fn state(&self) -> HttpState {
        let clock = Arc::new(DefaultClock);
        let tokens = Arc::new(JwtTokenCodec::new(SECRET, DEFAULT_TOKEN_TTL, clock.clone()));
        let auth = AuthService::new(
            Arc::new(self.store.users()),
            Arc::new(FixturePasswordHasher),
            tokens,
        );
        let gadgets = Arc::new(GadgetService::new(
            Arc::new(self.store.gadgets()),
            clock,
            Arc::new(ThreadRngGadgetRandomness),
        ));
        HttpState::new(Arc::new(auth), gadgets.clone(), gadgets)
    }

    async fn send(&self, request: test::TestRequest) -> Reply {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(self.state()))
                .app_data(json_config())
                .app_data(query_config())
                .wrap(Trace)
                .configure(configure_api),
        )
        .await;
        let response = test::call_service(&app, request.to_request()).await;
        let status = response.status();
        let has_trace_id = response.headers().contains_key(TRACE_ID_HEADER);
        let bytes = test::read_body(response).await;
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        Reply {
            status,
            body,
            has_trace_id,
        }
    }

    async fn signup(&self, email: &str, password: &str) -> Reply {
        self.send(
            test::TestRequest::post()
                .uri("/api/auth/signup")
                .set_json(json!({ "email": email, "password": password })),
        )
        .await
    }

    /// Sign up a fresh agent and return their bearer token.
    async fn agent_token(&self) -> String {
        let reply = self.signup("ethan@imf.gov", "mission-impossible").await;
        assert_eq!(reply.status, StatusCode::CREATED, "{}", reply.body);
        reply.body["token"].as_str().expect("token").to_owned()
    }

    async fn authed(&self, token: &str, request: test::TestRequest) -> Reply {
        self.send(request.insert_header(("Authorization", format!("Bearer {token}"))))
            .await
    }

    async fn create(&self, token: &str, body: Value) -> Value {
        let reply = self
            .authed(
                token,
                test::TestRequest::post().uri("/api/gadgets").set_json(body),
            )
            .await;
        assert_eq!(reply.status, StatusCode::CREATED, "{}", reply.body);
        reply.body["gadget"].clone()
    }
}

#[fixture]
fn harness() -> Harness {
    Harness {
        store: InMemoryStore::default(),
    }
}

fn timestamp(value: &Value) -> DateTime<Utc> {
    value
        .as_str()
        .expect("timestamp string")
        .parse()
        .expect("RFC 3339 timestamp")
}

fn gadget_id(gadget: &Value) -> String {
    gadget["id"].as_str().expect("gadget id").to_owned()
}

#[rstest]
#[actix_web::test]
async fn duplicate_signup_conflicts_without_creating_a_user(harness: Harness) {
    let first = harness.signup("ethan@imf.gov", "secret").await;
    assert_eq!(first.status, StatusCode::CREATED);
    assert_eq!(first.body["user"]["email"], "ethan@imf.gov");

    let second = harness.signup("ethan@imf.gov", "other").await;

    assert_eq!(second.status, StatusCode::CONFLICT);
    assert!(second.has_trace_id);
    assert_eq!(harness.store.user_count(), 1);
}

#[rstest]
#[actix_web::test]
async fn login_does_not_reveal_which_part_was_wrong(harness: Harness) {
    harness.agent_token().await;

    let wrong_password = harness
        .send(
            test::TestRequest::post()
                .uri("/api/auth/login")
                .set_json(json!({ "email": "ethan@imf.gov", "password": "nope" })),
        )
        .await;
    let unknown_email = harness
        .send(
            test::TestRequest::post()
                .uri("/api/auth/login")
                .set_json(json!({ "email": "luther@imf.gov", "password": "nope" })),
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body["message"], unknown_email.body["message"]);
}

#[rstest]
#[actix_web::test]
async fn login_token_opens_gadget_endpoints(harness: Harness) {
    harness.agent_token().await;
    let login = harness
        .send(
            test::TestRequest::post()
                .uri("/api/auth/login")
                .set_json(json!({ "email": "ethan@imf.gov", "password": "mission-impossible" })),
        )
        .await;
    assert_eq!(login.status, StatusCode::OK);
    let token = login.body["token"].as_str().expect("token");

    let listing = harness
        .authed(token, test::TestRequest::get().uri("/api/gadgets"))
        .await;

    assert_eq!(listing.status, StatusCode::OK);
    assert_eq!(listing.body["count"], 0);
}

#[rstest]
#[actix_web::test]
async fn gadget_routes_reject_missing_and_foreign_tokens(harness: Harness) {
    let missing = harness
        .send(test::TestRequest::get().uri("/api/gadgets"))
        .await;
    let foreign = harness
        .authed("eyJhbGciOiJIUzI1NiJ9.e30.forged", test::TestRequest::get().uri("/api/gadgets"))
        .await;

    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(foreign.status, StatusCode::UNAUTHORIZED);
}

#[rstest]
#[actix_web::test]
async fn created_gadget_defaults_and_codename_grammar(harness: Harness) {
    let token = harness.agent_token().await;

    let gadget = harness.create(&token, json!({ "name": "Drone X" })).await;

    assert_eq!(gadget["status"], "Available");
    assert_eq!(gadget["createdById"], 1);
    assert_eq!(gadget["createdAt"], gadget["updatedAt"]);
    let codename = gadget["codename"].as_str().expect("codename");
    let (prefix, noun) = codename.split_once(' ').expect("two tokens");
    assert!(CODENAME_PREFIXES.contains(&prefix), "{codename}");
    assert!(CODENAME_NOUNS.contains(&noun), "{codename}");
    let chance = gadget["missionSuccessProbability"].as_u64().expect("probability");
    assert!((70..=100).contains(&chance));
}

#[rstest]
#[actix_web::test]
async fn registry_keeps_accepting_gadgets_once_codenames_run_out(harness: Harness) {
    let token = harness.agent_token().await;
    let vocabulary = CODENAME_PREFIXES.len() * CODENAME_NOUNS.len();

    let mut codenames = HashSet::new();
    for n in 0..=vocabulary {
        let gadget = harness
            .create(&token, json!({ "name": format!("Decoy {n}") }))
            .await;
        codenames.insert(gadget["codename"].as_str().expect("codename").to_owned());
    }

    let listing = harness
        .authed(&token, test::TestRequest::get().uri("/api/gadgets"))
        .await;
    assert_eq!(listing.body["count"], vocabulary + 1);
    assert!(codenames.len() <= vocabulary);
}

#[rstest]
#[actix_web::test]
async fn list_filters_by_exact_status_newest_first(harness: Harness) {
    let token = harness.agent_token().await;
    let older = harness
        .create(&token, json!({ "name": "Pen", "status": "Deployed" }))
        .await;
    harness.create(&token, json!({ "name": "Watch" })).await;
    let newer = harness
        .create(&token, json!({ "name": "Car", "status": "Deployed" }))
        .await;

    let reply = harness
        .authed(
            &token,
            test::TestRequest::get().uri("/api/gadgets?status=Deployed"),
        )
        .await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["count"], 2);
    let gadgets = reply.body["gadgets"].as_array().expect("array");
    assert!(gadgets.iter().all(|g| g["status"] == "Deployed"));
    assert!(gadgets.iter().all(|g| g["creatorEmail"] == "ethan@imf.gov"));
    let ids: Vec<String> = gadgets.iter().map(gadget_id).collect();
    let newer_created = timestamp(&newer["createdAt"]);
    let older_created = timestamp(&older["createdAt"]);
    if newer_created > older_created {
        assert_eq!(ids, vec![gadget_id(&newer), gadget_id(&older)]);
    }
}

#[rstest]
#[actix_web::test]
async fn unknown_status_filter_is_rejected(harness: Harness) {
    let token = harness.agent_token().await;

    let reply = harness
        .authed(&token, test::TestRequest::get().uri("/api/gadgets?status=deployed"))
        .await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["details"]["code"], "invalid_status");
}

#[rstest]
#[actix_web::test]
async fn empty_update_leaves_record_untouched(harness: Harness) {
    let token = harness.agent_token().await;
    let created = harness.create(&token, json!({ "name": "Pen" })).await;
    let id = gadget_id(&created);
    let before = harness
        .store
        .gadget(&GadgetId::from_uuid(id.parse().expect("uuid")))
        .expect("stored");

    let reply = harness
        .authed(
            &token,
            test::TestRequest::patch()
                .uri(&format!("/api/gadgets/{id}"))
                .set_json(json!({})),
        )
        .await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    let after = harness
        .store
        .gadget(&GadgetId::from_uuid(id.parse().expect("uuid")))
        .expect("stored");
    assert_eq!(before, after);
}

#[rstest]
#[actix_web::test]
async fn partial_update_applies_only_present_fields(harness: Harness) {
    let token = harness.agent_token().await;
    let created = harness
        .create(&token, json!({ "name": "Pen", "description": "Writes underwater" }))
        .await;
    let id = gadget_id(&created);

    let reply = harness
        .authed(
            &token,
            test::TestRequest::patch()
                .uri(&format!("/api/gadgets/{id}"))
                .set_json(json!({ "description": null, "status": "Deployed" })),
        )
        .await;

    assert_eq!(reply.status, StatusCode::OK);
    let gadget = &reply.body["gadget"];
    assert_eq!(gadget["name"], "Pen");
    assert_eq!(gadget["description"], Value::Null);
    assert_eq!(gadget["status"], "Deployed");
    assert!(timestamp(&gadget["updatedAt"]) >= timestamp(&created["updatedAt"]));
}

#[rstest]
#[actix_web::test]
async fn update_of_unknown_gadget_is_not_found(harness: Harness) {
    let token = harness.agent_token().await;

    let reply = harness
        .authed(
            &token,
            test::TestRequest::patch()
                .uri(&format!("/api/gadgets/{}", GadgetId::random()))
                .set_json(json!({ "name": "Ghost" })),
        )
        .await;

    assert_eq!(reply.status, StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn decommission_twice_restamps_the_timestamp(harness: Harness) {
    let token = harness.agent_token().await;
    let id = gadget_id(&harness.create(&token, json!({ "name": "Jetpack" })).await);
    let delete = || test::TestRequest::delete().uri(&format!("/api/gadgets/{id}"));

    let first = harness.authed(&token, delete()).await;
    let second = harness.authed(&token, delete()).await;

    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(second.body["gadget"]["status"], "Decommissioned");
    assert!(
        timestamp(&second.body["gadget"]["decommissionedAt"])
            >= timestamp(&first.body["gadget"]["decommissionedAt"])
    );
}

#[rstest]
#[actix_web::test]
async fn self_destruct_handshake(harness: Harness) {
    let token = harness.agent_token().await;
    let id = gadget_id(&harness.create(&token, json!({ "name": "Briefcase" })).await);
    let uri = format!("/api/gadgets/{id}/self-destruct");
    let stored = || {
        harness
            .store
            .gadget(&GadgetId::from_uuid(id.parse().expect("uuid")))
            .expect("stored")
    };

    let challenge = harness
        .authed(&token, test::TestRequest::post().uri(&uri))
        .await;
    assert_eq!(challenge.status, StatusCode::BAD_REQUEST);
    let code = challenge.body["confirmationCode"].as_str().expect("code");
    assert_eq!(code.len(), 8);
    assert_eq!(stored().status(), GadgetStatus::Available);

    let malformed = harness
        .authed(
            &token,
            test::TestRequest::post()
                .uri(&uri)
                .set_json(json!({ "confirmationCode": "abc" })),
        )
        .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
    assert_eq!(stored().status(), GadgetStatus::Available);

    // Any well-formed code is accepted, not only the one just issued.
    let destroyed = harness
        .authed(
            &token,
            test::TestRequest::post()
                .uri(&uri)
                .set_json(json!({ "confirmationCode": "AB12CD34" })),
        )
        .await;
    assert_eq!(destroyed.status, StatusCode::OK);
    assert_eq!(destroyed.body["gadget"]["status"], "Destroyed");
    assert_eq!(destroyed.body["confirmationCode"], "AB12CD34");
    assert_eq!(stored().status(), GadgetStatus::Destroyed);

    let again = harness
        .authed(
            &token,
            test::TestRequest::post()
                .uri(&uri)
                .set_json(json!({ "confirmationCode": code })),
        )
        .await;
    assert_eq!(again.status, StatusCode::CONFLICT);
    assert_eq!(again.body["message"], "gadget already destroyed");
}

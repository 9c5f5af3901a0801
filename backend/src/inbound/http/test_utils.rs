//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use crate::domain::ports::{MockAuthCommand, MockGadgetCommand, MockGadgetQuery};
use crate::domain::{AuthenticatedUser, Email, UserId};
use crate::inbound::http::state::HttpState;

/// Token accepted by [`signed_in`].
pub const TEST_TOKEN: &str = "test-token";

/// `Authorization` header value carrying [`TEST_TOKEN`].
pub fn bearer_header() -> (&'static str, String) {
    ("Authorization", format!("Bearer {TEST_TOKEN}"))
}

pub fn test_user() -> AuthenticatedUser {
    AuthenticatedUser {
        user_id: UserId::new(42).expect("user id"),
        email: Email::new("ethan@imf.gov").expect("email"),
    }
}

/// Auth port that accepts [`TEST_TOKEN`] as [`test_user`] and rejects
/// everything else.
pub fn signed_in() -> MockAuthCommand {
    let mut auth = MockAuthCommand::new();
    auth.expect_verify_token().returning(|token| {
        if token == TEST_TOKEN {
            Ok(test_user())
        } else {
            Err(crate::domain::Error::unauthorized("invalid token"))
        }
    });
    auth
}

pub fn state_with(
    auth: MockAuthCommand,
    gadgets: MockGadgetCommand,
    gadgets_query: MockGadgetQuery,
) -> HttpState {
    HttpState::new(Arc::new(auth), Arc::new(gadgets), Arc::new(gadgets_query))
}

/// State whose gadget ports panic if called.
pub fn state_with_auth(auth: MockAuthCommand) -> HttpState {
    state_with(auth, MockGadgetCommand::new(), MockGadgetQuery::new())
}

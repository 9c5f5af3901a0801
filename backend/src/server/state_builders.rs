//! Wire persistence and security adapters into the HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};

use gadget_registry::domain::ports::ThreadRngGadgetRandomness;
use gadget_registry::domain::{AuthService, GadgetService};
use gadget_registry::inbound::http::state::HttpState;
use gadget_registry::outbound::persistence::{DieselGadgetRepository, DieselUserRepository};
use gadget_registry::outbound::security::Argon2PasswordHasher;

use super::ServerConfig;

/// Build the handler state. One gadget service backs both gadget ports.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);

    let auth = AuthService::new(
        Arc::new(DieselUserRepository::new(config.db_pool.clone())),
        Arc::new(Argon2PasswordHasher),
        Arc::clone(&config.token_codec),
    );
    let gadgets = Arc::new(GadgetService::new(
        Arc::new(DieselGadgetRepository::new(config.db_pool.clone())),
        clock,
        Arc::new(ThreadRngGadgetRandomness),
    ));

    web::Data::new(HttpState::new(Arc::new(auth), gadgets.clone(), gadgets))
}

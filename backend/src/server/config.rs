//! Inputs required to build the HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use gadget_registry::outbound::persistence::DbPool;
use gadget_registry::outbound::security::JwtTokenCodec;

/// Listener address plus the shared adapters every worker clones.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) token_codec: Arc<JwtTokenCodec>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr, db_pool: DbPool, token_codec: JwtTokenCodec) -> Self {
        Self {
            bind_addr,
            db_pool,
            token_codec: Arc::new(token_codec),
        }
    }
}

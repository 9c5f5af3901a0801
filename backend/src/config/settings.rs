//! Non-secret server settings loaded via OrthoConfig.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use chrono::Duration;
use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::PoolConfig;
use crate::outbound::security::DEFAULT_TOKEN_TTL;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 8080;

/// Listener, pool and token settings.
///
/// Every value may come from `GADGETS_*` environment variables, a config
/// file or the command line.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "GADGETS")]
pub struct ServerSettings {
    /// Address to bind. Defaults to all interfaces.
    pub host: Option<IpAddr>,
    /// Port to bind. Defaults to 8080.
    pub port: Option<u16>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Bearer token lifetime in hours. Defaults to 24.
    pub token_ttl_hours: Option<i64>,
}

impl ServerSettings {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(DEFAULT_HOST),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    /// Token lifetime, ignoring non-positive overrides.
    pub fn token_ttl(&self) -> Duration {
        self.token_ttl_hours
            .filter(|hours| *hours > 0)
            .map_or(DEFAULT_TOKEN_TTL, Duration::hours)
    }

    /// Pool configuration for `database_url` with the configured size cap.
    pub fn pool_config(&self, database_url: &str) -> PoolConfig {
        let config = PoolConfig::new(database_url);
        match self.pool_max_size {
            Some(size) => config.with_max_size(size),
            None => config,
        }
    }
}

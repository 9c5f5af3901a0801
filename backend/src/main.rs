//! Gadget registry entry point: configuration, tracing, database, HTTP.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use gadget_registry::config::{ServerSettings, secrets_from_process_env};
use gadget_registry::inbound::http::health::HealthState;
use gadget_registry::outbound::persistence::{DbPool, run_pending_migrations};
use gadget_registry::outbound::security::JwtTokenCodec;

use server::{ServerConfig, create_server};

/// Resolve on SIGINT. If the handler cannot be installed, never resolve.
async fn wait_for_ctrl_c() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "SIGINT handler unavailable; shutdown must come from elsewhere");
        std::future::pending::<()>().await;
    }
}

/// Resolve on SIGINT or, on Unix, SIGTERM.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    () = wait_for_ctrl_c() => {}
                    _ = term.recv() => {}
                }
            }
            Err(err) => {
                warn!(error = %err, "SIGTERM handler unavailable; waiting for SIGINT only");
                wait_for_ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        wait_for_ctrl_c().await;
    }
}

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("failed to load server settings: {err}"))?;
    let secrets = secrets_from_process_env().context("failed to read secrets")?;

    let applied = run_pending_migrations(&secrets.database_url)
        .await
        .context("failed to apply database migrations")?;
    let pool = DbPool::new(settings.pool_config(&secrets.database_url))
        .await
        .context("failed to build database pool")?;
    let token_codec =
        JwtTokenCodec::new(secrets.jwt_secret(), settings.token_ttl(), Arc::new(DefaultClock));
    drop(secrets);

    let bind_addr = settings.bind_addr();
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state.clone(),
        ServerConfig::new(bind_addr, pool, token_codec),
    )
    .context("failed to start HTTP server")?;
    info!(%bind_addr, applied_migrations = applied, "gadget registry listening");

    let handle = server.handle();
    let drain_state = health_state.clone();
    actix_web::rt::spawn(async move {
        shutdown_signal().await;
        drain_state.mark_unhealthy();
        info!("shutdown requested; draining connections");
        handle.stop(true).await;
    });

    server.await.context("HTTP server terminated with an error")?;
    health_state.mark_unhealthy();
    Ok(())
}

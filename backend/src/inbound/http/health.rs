//! Liveness and readiness probes, plus the human-facing `/` and `/health`
//! status documents.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Process health flags shared between `main` and the probe handlers.
///
/// Starts live but not ready. `main` marks it ready once the pool and
/// migrations are up and unhealthy once the server begins draining.
#[derive(Debug)]
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }
}

fn probe(ok: bool) -> HttpResponse {
    let mut response = if ok {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    response
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .finish()
}

/// Readiness probe.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Database pool built and migrations applied"),
        (status = 503, description = "Still starting up")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    probe(state.is_ready())
}

/// Liveness probe. Fails once shutdown has begun.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Process is alive"),
        (status = 503, description = "Draining for shutdown")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    probe(state.is_alive())
}

/// Body of `GET /`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ServiceStatus {
    #[schema(example = "Gadget registry is running")]
    pub message: String,
    #[schema(example = "healthy")]
    pub status: String,
}

/// Body of `GET /health`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthSummary {
    #[schema(example = "API is healthy")]
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Service banner.
#[utoipa::path(
    get,
    path = "/",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Service is up", body = ServiceStatus),
        (status = 503, description = "Draining for shutdown", body = ServiceStatus)
    )
)]
#[get("/")]
pub async fn root(state: web::Data<HealthState>) -> HttpResponse {
    let (mut response, status) = if state.is_alive() {
        (HttpResponse::Ok(), "healthy")
    } else {
        (HttpResponse::ServiceUnavailable(), "draining")
    };
    response
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(ServiceStatus {
            message: "Gadget registry is running".to_owned(),
            status: status.to_owned(),
        })
}

/// Liveness with a server timestamp, for humans and simple uptime checks.
#[utoipa::path(
    get,
    path = "/health",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Process is alive", body = HealthSummary),
        (status = 503, description = "Draining for shutdown", body = HealthSummary)
    )
)]
#[get("/health")]
pub async fn health_summary(state: web::Data<HealthState>) -> HttpResponse {
    let (mut response, message) = if state.is_alive() {
        (HttpResponse::Ok(), "API is healthy")
    } else {
        (HttpResponse::ServiceUnavailable(), "API is shutting down")
    };
    response
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(HealthSummary {
            message: message.to_owned(),
            timestamp: Utc::now(),
        })
}

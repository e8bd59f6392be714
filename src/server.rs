//! HTTP service exposing the API key extractor.
//!
//! Routes:
//! * `GET /health` - liveness probe
//! * `GET /v1/auth/inspect` - echoes the redacted key from `Authorization: ApiKey <key>`

use actix_web::middleware::Condition;
use actix_web::{web, App, HttpResponse, HttpServer};
use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_actix_web::{DefaultRootSpanBuilder, TracingLogger};

use crate::auth::{ApiKey, API_KEY_SCHEME};
use crate::config::Config;
use crate::error::ServiceResult;
use crate::utils::redact_key;

/// Body returned by the inspection route
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectResponse {
    pub scheme: String,
    pub key: String,
    pub length: usize,
}

impl From<&ApiKey> for InspectResponse {
    fn from(key: &ApiKey) -> Self {
        Self {
            scheme: API_KEY_SCHEME.to_string(),
            key: redact_key(key),
            length: key.chars().count(),
        }
    }
}

/// Register the service routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(handle_health))
        .route("/v1/auth/inspect", web::get().to(handle_inspect));
}

async fn handle_health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "version": crate::SERVICE_VERSION,
    }))
}

async fn handle_inspect(key: ApiKey) -> HttpResponse {
    HttpResponse::Ok().json(InspectResponse::from(&key))
}

/// Request logging middleware, a no-op unless `enabled`
pub fn request_logger(enabled: bool) -> Condition<TracingLogger<DefaultRootSpanBuilder>> {
    Condition::new(enabled, TracingLogger::default())
}

/// Bind the configured address and serve until shutdown
pub async fn run(config: &Config) -> ServiceResult<()> {
    let bind_addr = config.server.bind_addr();
    info!("Starting HTTP server on {}", bind_addr);

    let request_logging = config.logging.enable_request_logging;
    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(request_logger(request_logging))
            .configure(configure)
    });

    if let Some(workers) = config.server.workers {
        server = server.workers(workers);
    }

    server.bind(&bind_addr)?.run().await?;

    info!("HTTP server stopped");
    Ok(())
}

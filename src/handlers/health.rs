// src/handlers/health.rs
// DOCUMENTATION: Banner, health check and diagnostics handlers
// PURPOSE: Simple endpoints to verify service and store status

use crate::config::Config;
use crate::db::SharedStore;
use crate::errors::PlacesError;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Most collection names reported by the diagnostics endpoint
const MAX_LISTED_COLLECTIONS: usize = 10;

/// Longest store error shown inline by the diagnostics endpoint
const MAX_DIAGNOSTIC_ERROR: usize = 50;

/// GET /
pub async fn root() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "message": "Karnataka Tourism API is running"
    }))
}

/// GET /health
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "service": "karnataka-places",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Response for the diagnostics endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct DiagnosticsResponse {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

/// GET /test
/// Report store reachability and configuration
///
/// DOCUMENTATION: Never fails; store errors are reported inline, shortened
pub async fn diagnostics(
    store: web::Data<SharedStore>,
    config: web::Data<Config>,
) -> impl Responder {
    let mut response = DiagnosticsResponse {
        backend: "running".to_string(),
        database: store.backend().to_string(),
        database_url: set_or_not(config.database_url.is_some()),
        database_name: set_or_not(config.database_name.is_some()),
        connection_status: "Not Connected".to_string(),
        collections: Vec::new(),
    };

    match store.list_collections().await {
        Ok(mut names) => {
            names.truncate(MAX_LISTED_COLLECTIONS);
            response.collections = names;
            response.database = format!("{} connected & working", store.backend());
            response.connection_status = "Connected".to_string();
        }
        Err(e) => {
            let message: String = e.to_string().chars().take(MAX_DIAGNOSTIC_ERROR).collect();
            log::warn!("Diagnostics could not list collections: {}", e);
            response.database = format!("{} error: {}", store.backend(), message);
        }
    }

    HttpResponse::Ok().json(response)
}

/// Fallback for unmatched routes
pub async fn not_found(req: HttpRequest) -> Result<HttpResponse, PlacesError> {
    Err(PlacesError::NotFound(format!("{} {}", req.method(), req.path())))
}

fn set_or_not(is_set: bool) -> String {
    let label = if is_set { "Set" } else { "Not Set" };
    label.to_string()
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(root))
        .route("/health", web::get().to(health_check))
        .route("/test", web::get().to(diagnostics));
}

//! HTTP endpoint
//!
//! Provides two endpoints:
//! - `/api/seo-audit` - Runs one audit and returns the JSON payload
//! - `/health` - Liveness check
//!
//! Requests are independent; the only state shared between them is the
//! coordinator's HTTP client.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::json;

use crate::config::Config;
use crate::crawler::{Coordinator, RawAuditParams};

/// JSON body for failed requests
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
}

/// Builds the router around an existing coordinator
pub fn router(coordinator: Coordinator) -> Router {
    Router::new()
        .route("/api/seo-audit", get(audit_handler))
        .route("/health", get(health_handler))
        .with_state(coordinator)
}

/// Binds the configured address and serves until the process exits
pub async fn serve(config: Config) -> Result<(), anyhow::Error> {
    let bind_address = config.server.bind_address.clone();
    let coordinator = Coordinator::new(config)
        .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind {}: {}", bind_address, e))?;

    tracing::info!("Listening on http://{}/", bind_address);
    tracing::info!("  - Audit: http://{}/api/seo-audit", bind_address);
    tracing::info!("  - Health: http://{}/health", bind_address);

    axum::serve(listener, router(coordinator))
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}

async fn audit_handler(
    State(coordinator): State<Coordinator>,
    Query(params): Query<RawAuditParams>,
) -> Response {
    match coordinator.handle(&params).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            tracing::error!("Audit request failed: {}", e);
            let body = ErrorResponse {
                ok: false,
                error: e.to_string(),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}

async fn health_handler() -> Response {
    (StatusCode::OK, Json(json!({ "ok": true }))).into_response()
}

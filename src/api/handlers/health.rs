//! Health check handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};

use crate::api::state::AppState;

/// Root route. Answers with an empty body.
pub async fn home() -> &'static str {
    ""
}

/// Liveness probe - always returns 200 if the service is running.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness probe - checks that the database answers.
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let storage_ok = match state.storage.health_check().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Storage health check failed");
            false
        }
    };

    let status_code = if storage_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = Json(json!({
        "ready": storage_ok,
        "components": {
            "storage": storage_ok,
            "backend": state.storage.backend_name()
        }
    }));

    (status_code, response)
}

/// Prometheus metrics endpoint.
///
/// Without an installed recorder only the liveness gauge is reported.
pub async fn metrics(State(state): State<AppState>) -> String {
    let mut output = state
        .metrics
        .as_ref()
        .map(metrics_exporter_prometheus::PrometheusHandle::render)
        .unwrap_or_default();

    output.push_str("# HELP mission_control_up Whether the service is up\n");
    output.push_str("# TYPE mission_control_up gauge\n");
    output.push_str("mission_control_up 1\n");

    output
}

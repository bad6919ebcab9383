//! Health check endpoints for Kubernetes-style liveness and readiness checks.
//!
//! - `/livez` - Basic liveness check (immediate 200, no checks)
//! - `/healthz` - Configured store chains (no backend calls)

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /livez - Basic liveness check.
#[axum::debug_handler]
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /healthz - Reports which stores back each resource, in fallback order.
#[axum::debug_handler]
pub async fn healthz(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "storage": &*state.storage,
    }))
}

//! Informational endpoints
//!
//! Pure reads of process/host state or fixed data. Host access goes
//! through the injected provider so tests can stub it.

use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

use crate::api::state::AppState;
use crate::types::sample_users;

/// GET /api/welcome - API welcome message
pub async fn welcome() -> impl IntoResponse {
    Json(json!({
        "message": "Welcome to mbServer!",
        "status": "success",
        "timestamp": Utc::now(),
    }))
}

/// GET /health - Health check
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let host = &state.host;
    let memory = host.memory();

    Json(json!({
        "status": "healthy",
        "uptime": host.uptime_secs(),
        "timestamp": Utc::now(),
        "hostname": host.hostname(),
        "platform": host.platform(),
        "memory": {
            "total": memory.total_bytes,
            "free": memory.free_bytes,
            "processRss": memory.process_rss_bytes,
        },
    }))
}

/// GET /api/server-info - Host and process metadata
pub async fn server_info(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let host = &state.host;
    let memory = host.memory();

    Json(json!({
        "hostname": host.hostname(),
        "platform": host.platform(),
        "architecture": host.architecture(),
        "cpus": host.cpus(),
        "uptime": host.uptime_secs(),
        "serverVersion": crate::VERSION,
        "timestamp": Utc::now(),
        "memory": {
            "total": format_mb(memory.total_bytes),
            "free": format_mb(memory.free_bytes),
            "usage": memory.process_rss_bytes,
        },
        "loadAverage": host.load_average(),
    }))
}

/// GET /api/users - Fixed sample user list
pub async fn list_users() -> impl IntoResponse {
    let users = sample_users();

    Json(json!({
        "message": "Users retrieved successfully",
        "count": users.len(),
        "data": users,
    }))
}

/// Render a byte count as a whole-megabyte string, e.g. "512 MB"
fn format_mb(bytes: Option<u64>) -> Value {
    match bytes {
        Some(bytes) => json!(format!("{} MB", bytes / 1024 / 1024)),
        None => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_mb() {
        assert_eq!(format_mb(Some(512 * 1024 * 1024)), json!("512 MB"));
        assert_eq!(format_mb(None), Value::Null);
    }
}

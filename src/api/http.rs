//! HTTP router setup with Axum

use std::sync::Arc;

use axum::http::{StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeFile;

use super::rest::{events, info};
use super::state::AppState;

/// Create the Axum router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS configuration - allow all origins for development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // An unrecognized method on a known path gets the same structured
    // not-found body as an unrecognized path, not a bare 405.
    Router::new()
        // Dashboard page
        .route_service("/", ServeFile::new("public/index.html"))
        // Informational endpoints
        .route("/health", get(info::health).fallback(not_found))
        .route("/api/welcome", get(info::welcome).fallback(not_found))
        .route("/api/server-info", get(info::server_info).fallback(not_found))
        .route("/api/users", get(info::list_users).fallback(not_found))
        // Event endpoints
        .route(
            "/api/event/saveEvent",
            post(events::save_event).fallback(not_found),
        )
        .route("/api/events", get(events::list_events).fallback(not_found))
        .fallback(not_found)
        .layer(cors)
        .with_state(state)
}

/// Structured response for any unrecognized path or method
async fn not_found(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "message": "Route not found",
            "path": uri.path(),
        })),
    )
}

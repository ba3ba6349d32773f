//! REST API endpoints
//!
//! - `POST /api/event/saveEvent` - Create or update an event
//! - `GET /api/events` - List events, newest-created first
//! - `GET /api/welcome` - API welcome message
//! - `GET /health` - Health check
//! - `GET /api/server-info` - Host and process metadata
//! - `GET /api/users` - Fixed sample user list

pub mod events;
pub mod info;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Required fields for the saveEvent write path
pub const SAVE_EVENT_REQUIRED: [&str; 3] = ["id", "date", "details"];

/// API error response
///
/// Rendered as the JSON body of the failure, with the status carried
/// alongside rather than serialized.
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<&'static str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Validation failure on the write path: one or more required
    /// fields were absent, null, or empty.
    pub fn missing_fields() -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: "Missing required fields".to_string(),
            message: "Please provide id, date, and details".to_string(),
            required: Some(SAVE_EVENT_REQUIRED.to_vec()),
            details: None,
        }
    }

    /// Unexpected internal fault
    pub fn internal(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: "Internal server error".to_string(),
            message: message.into(),
            required: None,
            details: Some(details.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

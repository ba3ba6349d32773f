//! Event endpoints

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ApiError;
use crate::api::state::AppState;
use crate::sink::ObjectMetadata;
use crate::types::{EventRecord, MirrorStatus};

/// Request body for POST /api/event/saveEvent
///
/// Every field is optional at the serde layer so that absence can be
/// reported as a validation error instead of a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct SaveEventRequest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub details: Option<Value>,
}

/// Response for a successful saveEvent call
#[derive(Debug, Serialize)]
pub struct SaveEventResponse {
    pub message: &'static str,
    pub event: EventRecord,
    pub action: &'static str,
}

/// Response for GET /api/events
#[derive(Debug, Serialize)]
pub struct EventListResponse {
    pub message: &'static str,
    pub data: Vec<EventRecord>,
    pub count: usize,
    pub timestamp: DateTime<Utc>,
}

/// Reject the request unless id, date, and details are all present and
/// non-empty. The store is never touched for a rejected request.
fn validate(body: SaveEventRequest) -> Result<(String, String, Value), ApiError> {
    let id = body
        .id
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(ApiError::missing_fields)?;
    let date = body
        .date
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(ApiError::missing_fields)?;
    let details = body
        .details
        .filter(|v| !v.is_null())
        .ok_or_else(ApiError::missing_fields)?;

    Ok((id, date, details))
}

/// POST /api/event/saveEvent - Create or update an event
///
/// The HTTP status is decided by the store outcome alone; the mirror
/// write runs as a detached task whose result only sets the
/// cloud-storage annotation on the response record.
pub async fn save_event(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SaveEventRequest>,
) -> Result<Response, ApiError> {
    let (id, date, details) = validate(body)?;

    let (record, was_created) = state.store.upsert(&id, date, details);

    let payload = serde_json::to_vec_pretty(&record)
        .map_err(|e| ApiError::internal("Failed to save event", e.to_string()))?;
    let object_name = format!("events/event_{}_{}.json", id, Utc::now().timestamp_millis());
    let metadata = ObjectMetadata::json_event(&id);

    let sink = state.sink.clone();
    let mirror_task =
        tokio::spawn(async move { sink.save(&object_name, payload, metadata).await });

    let (status, message, action) = if was_created {
        (StatusCode::CREATED, "Event created successfully", "created")
    } else {
        (StatusCode::OK, "Event updated successfully", "updated")
    };

    let mirror = match mirror_task.await {
        Ok(Ok(stored)) => {
            tracing::info!(event_id = %id, object = %stored, "event mirrored to object sink");
            MirrorStatus::Stored {
                cloud_storage_file: stored,
            }
        }
        Ok(Err(e)) => {
            tracing::warn!(event_id = %id, error = %e, "failed to mirror event to object sink");
            MirrorStatus::Failed {
                cloud_storage_error: "Failed to save to cloud storage".to_string(),
            }
        }
        Err(e) => {
            tracing::warn!(event_id = %id, error = %e, "mirror task did not complete");
            MirrorStatus::Failed {
                cloud_storage_error: "Failed to save to cloud storage".to_string(),
            }
        }
    };

    let event = state.store.record_mirror(&id, mirror).unwrap_or(record);

    Ok((
        status,
        Json(SaveEventResponse {
            message,
            event,
            action,
        }),
    )
        .into_response())
}

/// GET /api/events - List all events, newest-created first
pub async fn list_events(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let data = state.store.list();

    Json(EventListResponse {
        message: "Events retrieved successfully",
        count: data.len(),
        data,
        timestamp: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(id: Option<&str>, date: Option<&str>, details: Option<Value>) -> SaveEventRequest {
        SaveEventRequest {
            id: id.map(String::from),
            date: date.map(String::from),
            details,
        }
    }

    #[test]
    fn test_validate_accepts_complete_body() {
        let (id, date, details) =
            validate(request(Some("e1"), Some("2024-01-01"), Some(json!({"note": "x"})))).unwrap();
        assert_eq!(id, "e1");
        assert_eq!(date, "2024-01-01");
        assert_eq!(details["note"], "x");
    }

    #[test]
    fn test_validate_rejects_missing_fields() {
        assert!(validate(request(None, Some("2024-01-01"), Some(json!({})))).is_err());
        assert!(validate(request(Some("e1"), None, Some(json!({})))).is_err());
        assert!(validate(request(Some("e1"), Some("2024-01-01"), None)).is_err());
    }

    #[test]
    fn test_validate_rejects_empty_and_null_values() {
        assert!(validate(request(Some(""), Some("2024-01-01"), Some(json!({})))).is_err());
        assert!(validate(request(Some("e1"), Some("   "), Some(json!({})))).is_err());
        assert!(validate(request(Some("e1"), Some("2024-01-01"), Some(Value::Null))).is_err());
    }
}

//! Event record types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A stored event, keyed by its caller-supplied identifier.
///
/// `date` and `details` are opaque to the server: the date is never parsed
/// and the details may be any well-formed JSON value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: String,
    pub date: String,
    pub details: Value,
    /// Set once when the record is first created, never changed afterwards.
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    /// Refreshed on every write to this identifier.
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
    /// Outcome of the most recent mirror attempt, if any.
    #[serde(flatten)]
    pub mirror: Option<MirrorStatus>,
}

/// Outcome of mirroring a record to the object sink.
///
/// Serialized flattened into the event record as either a
/// `cloudStorageFile` or a `cloudStorageError` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MirrorStatus {
    Stored {
        #[serde(rename = "cloudStorageFile")]
        cloud_storage_file: String,
    },
    Failed {
        #[serde(rename = "cloudStorageError")]
        cloud_storage_error: String,
    },
}

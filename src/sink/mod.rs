//! Durable object sink
//!
//! Upserted events are mirrored to an external blob store as named JSON
//! payloads. The mirror write is best-effort: its outcome only ever
//! becomes an annotation on the record, never a request failure.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Result type for sink operations
pub type SinkResult<T> = Result<T, SinkError>;

/// Errors that can occur when writing to the object sink
#[derive(Debug)]
pub enum SinkError {
    Io(std::io::Error),
    Json(serde_json::Error),
    InvalidName(String),
}

impl std::fmt::Display for SinkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SinkError::Io(e) => write!(f, "IO error: {}", e),
            SinkError::Json(e) => write!(f, "JSON error: {}", e),
            SinkError::InvalidName(name) => write!(f, "Invalid object name: {}", name),
        }
    }
}

impl std::error::Error for SinkError {}

impl From<std::io::Error> for SinkError {
    fn from(e: std::io::Error) -> Self {
        SinkError::Io(e)
    }
}

impl From<serde_json::Error> for SinkError {
    fn from(e: serde_json::Error) -> Self {
        SinkError::Json(e)
    }
}

/// Metadata attached to every mirrored object
#[derive(Debug, Clone, Serialize)]
pub struct ObjectMetadata {
    #[serde(rename = "contentType")]
    pub content_type: String,
    #[serde(rename = "eventId")]
    pub event_id: String,
    #[serde(rename = "uploadedAt")]
    pub uploaded_at: DateTime<Utc>,
    pub source: String,
}

impl ObjectMetadata {
    /// Metadata for an event payload written by the saveEvent API
    pub fn json_event(event_id: &str) -> Self {
        Self {
            content_type: "application/json".to_string(),
            event_id: event_id.to_string(),
            uploaded_at: Utc::now(),
            source: "saveEvent-api".to_string(),
        }
    }
}

/// An addressable blob store accepting named byte payloads.
///
/// Implementations may fail independently of the primary operation;
/// callers treat a failed save as recoverable by annotation only.
#[async_trait]
pub trait ObjectSink: Send + Sync {
    /// Store `bytes` under `name`, returning the name the object was
    /// stored as.
    async fn save(&self, name: &str, bytes: Vec<u8>, metadata: ObjectMetadata)
        -> SinkResult<String>;
}

/// Object sink backed by a local directory.
///
/// Each payload is written to `<root>/<name>` with the metadata in a
/// `.meta.json` sidecar next to it.
pub struct FsObjectSink {
    root: PathBuf,
}

impl FsObjectSink {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Root directory the sink writes under
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, name: &str) -> SinkResult<PathBuf> {
        let relative = Path::new(name);
        // Object names must stay inside the sink root
        if relative.is_absolute()
            || relative
                .components()
                .any(|c| matches!(c, Component::ParentDir))
        {
            return Err(SinkError::InvalidName(name.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ObjectSink for FsObjectSink {
    async fn save(
        &self,
        name: &str,
        bytes: Vec<u8>,
        metadata: ObjectMetadata,
    ) -> SinkResult<String> {
        let path = self.resolve(name)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&path, bytes).await?;

        let meta_path = path.with_extension("meta.json");
        let meta_bytes = serde_json::to_vec_pretty(&metadata)?;
        tokio::fs::write(&meta_path, meta_bytes).await?;

        Ok(name.to_string())
    }
}

//! mbServer event service
//!
//! A minimal HTTP JSON service exposing informational endpoints and one
//! stateful resource: events, which can be created, upserted by
//! identifier, and listed newest-created first. Each written event is
//! mirrored best-effort to a durable object sink; a failed mirror only
//! annotates the record, it never fails the request.
//!
//! # Modules
//!
//! - `types`: Core data structures (EventRecord, MirrorStatus, User)
//! - `event_store`: In-memory event index with upsert and list
//! - `sink`: Durable object sink trait and filesystem implementation
//! - `host`: Host info provider for the informational endpoints
//! - `api`: Axum router, shared state, and REST handlers
//! - `config`: Environment-driven process configuration
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use mbserver::api::http::create_router;
//! use mbserver::api::state::AppState;
//! use mbserver::event_store::EventStore;
//! use mbserver::host::SystemHost;
//! use mbserver::sink::FsObjectSink;
//!
//! let state = Arc::new(AppState::new(
//!     Arc::new(EventStore::new()),
//!     Arc::new(FsObjectSink::new("storage")),
//!     Arc::new(SystemHost::new()),
//! ));
//! let app = create_router(state);
//! ```

pub mod api;
pub mod config;
pub mod event_store;
pub mod host;
pub mod sink;
pub mod types;

// Re-export commonly used items at crate root
pub use api::http::create_router;
pub use api::state::AppState;
pub use config::ServerConfig;
pub use event_store::EventStore;
pub use host::{HostInfoProvider, SystemHost};
pub use sink::{FsObjectSink, ObjectSink};
pub use types::{EventRecord, MirrorStatus, User};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

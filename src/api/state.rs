//! Shared application state

use std::sync::Arc;

use crate::event_store::EventStore;
use crate::host::HostInfoProvider;
use crate::sink::ObjectSink;

/// State shared by all request handlers
pub struct AppState {
    /// The in-memory event index
    pub store: Arc<EventStore>,

    /// Durable object sink for best-effort event mirroring
    pub sink: Arc<dyn ObjectSink>,

    /// Process/host state for the informational endpoints
    pub host: Arc<dyn HostInfoProvider>,
}

impl AppState {
    pub fn new(
        store: Arc<EventStore>,
        sink: Arc<dyn ObjectSink>,
        host: Arc<dyn HostInfoProvider>,
    ) -> Self {
        Self { store, sink, host }
    }
}

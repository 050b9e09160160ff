//! Recording forwarder for asserting connect hand-offs.

use std::sync::Mutex;

use async_trait::async_trait;

use gatehouse_core::error::Result;
use gatehouse_core::forward::Forwarder;
use gatehouse_core::inventory::Resource;
use gatehouse_core::terminal::Terminal;

/// A forwarder that records every hand-off instead of relaying bytes.
#[derive(Debug, Default)]
pub struct RecordingForwarder {
    calls: Mutex<Vec<(String, String)>>,
}

impl RecordingForwarder {
    /// Create a forwarder with no recorded calls.
    pub fn new() -> Self {
        Self::default()
    }

    /// The (hostname, identity) pairs handed off so far.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl Forwarder for RecordingForwarder {
    async fn connect(
        &self,
        resource: &Resource,
        identity: &str,
        _term: &mut dyn Terminal,
    ) -> Result<()> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((resource.hostname.clone(), identity.to_string()));
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

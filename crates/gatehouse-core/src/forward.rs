//! Hand-off seam to the connection-forwarding component.
//!
//! Once the session resolves a unique resource, control passes to the
//! forwarding collaborator, which relays bytes between the terminal and
//! the chosen target. The collaborator is opaque to this core; control
//! returns only after the forwarded session ends.

use async_trait::async_trait;

use crate::error::Result;
use crate::inventory::Resource;
use crate::terminal::Terminal;

/// Forwards a connected terminal to a chosen resource.
#[async_trait]
pub trait Forwarder: Send + Sync {
    /// Relay the terminal to `resource` using the given login identity.
    ///
    /// Blocks until the forwarded session ends; the terminal is handed
    /// back to the caller afterwards.
    async fn connect(
        &self,
        resource: &Resource,
        identity: &str,
        term: &mut dyn Terminal,
    ) -> Result<()>;
}

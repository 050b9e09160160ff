//! Test collaborators for gatehouse.
//!
//! Scripted stand-ins for the terminal transport, the inventory
//! service, and the forwarding component, allowing session logic to be
//! exercised without a real peer, backend, or target.

mod forward;
mod inventory;
mod terminal;

pub use forward::RecordingForwarder;
pub use inventory::{sample_groups, sample_resources, FailingInventory, StaticInventory};
pub use terminal::{ScriptedTerminal, TerminalOutput};

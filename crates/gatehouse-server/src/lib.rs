//! gatehouse-server: interactive session serving for the access gateway.
//!
//! This crate provides:
//! - The menu command dispatcher
//! - The per-connection interactive session loop
//! - A TCP listener spawning one session per client
//! - The file-backed inventory and TCP forwarder used standalone
//! - CLI argument parsing for the server binary

pub mod cli;
pub mod dispatch;
pub mod forward;
pub mod inventory_file;
pub mod listener;
pub mod session;

pub use cli::Cli;
pub use listener::{GatewayListener, ServerConfig, TcpTerminal};
pub use session::{InteractiveSession, SessionPhase};

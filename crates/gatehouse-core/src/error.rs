//! Error types for gatehouse-core.

use thiserror::Error;

/// Main error type for gatehouse operations.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error from underlying system calls.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The terminal peer closed the connection.
    #[error("connection closed")]
    ConnectionClosed,

    /// Terminal transport failure.
    #[error("transport error: {message}")]
    Transport { message: String },

    /// Inventory backend failure.
    #[error("inventory error: {message}")]
    Inventory { message: String },

    /// Forwarding hand-off failure.
    #[error("forward error: {message}")]
    Forward { message: String },

    /// Invalid configuration.
    #[error("config error: {message}")]
    Config { message: String },
}

impl Error {
    /// Returns true if this error means the terminal peer went away.
    ///
    /// Disconnect-class errors end the owning session quietly; anything
    /// else is logged as a session fault.
    pub fn is_disconnect(&self) -> bool {
        matches!(
            self,
            Error::ConnectionClosed | Error::Io(_) | Error::Transport { .. }
        )
    }
}

/// Convenience result type for gatehouse operations.
pub type Result<T> = std::result::Result<T, Error>;

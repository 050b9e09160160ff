//! Terminal transport seam and the input line editor.
//!
//! The terminal collaborator delivers raw byte chunks with no framing
//! guarantee: a chunk may be a single keystroke, several keystrokes, or
//! a split multi-byte sequence. The [`LineEditor`] reconstructs logical
//! input lines from that stream and echoes corrections back.

mod editor;

pub use editor::{EditEvent, LineEditor};

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Result;

/// The terminal transport collaborator.
///
/// `read_chunk` blocks until bytes arrive; an empty chunk means the
/// peer closed. The core never assumes a maximum line length or that a
/// read returns a whole line.
#[async_trait]
pub trait Terminal: Send {
    /// Read at most `max` raw bytes from the peer.
    async fn read_chunk(&mut self, max: usize) -> Result<Bytes>;

    /// Write raw bytes back to the peer.
    async fn write_all(&mut self, data: &[u8]) -> Result<()>;
}

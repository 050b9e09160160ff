//! Scripted terminal for testing without a real peer.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;

use gatehouse_core::error::Result;
use gatehouse_core::terminal::Terminal;

/// A terminal that replays queued input chunks and captures output.
///
/// Reads pop the next scripted chunk regardless of the requested
/// maximum (chunk sizes are caller-controlled, exactly like a real
/// transport); an exhausted script reads as a zero-length chunk, which
/// the session treats as the peer closing. Output is shared through
/// [`TerminalOutput`] so it stays observable after the session consumes
/// the terminal.
#[derive(Debug, Default)]
pub struct ScriptedTerminal {
    chunks: VecDeque<Bytes>,
    output: Arc<Mutex<Vec<u8>>>,
    hold_open: bool,
}

/// Shared view of everything a session wrote to a [`ScriptedTerminal`].
#[derive(Debug, Clone, Default)]
pub struct TerminalOutput(Arc<Mutex<Vec<u8>>>);

impl TerminalOutput {
    /// Snapshot of the raw output bytes.
    pub fn bytes(&self) -> Vec<u8> {
        self.0.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Output decoded for assertions on user-visible text.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes()).into_owned()
    }

    /// Occurrences of `needle` in the decoded output.
    pub fn count(&self, needle: &str) -> usize {
        self.text().matches(needle).count()
    }
}

impl ScriptedTerminal {
    /// Create a terminal with no scripted input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a terminal that will replay `script` chunk by chunk.
    pub fn with_script(script: &[&[u8]]) -> Self {
        Self {
            chunks: script.iter().map(|c| Bytes::copy_from_slice(c)).collect(),
            output: Arc::new(Mutex::new(Vec::new())),
            hold_open: false,
        }
    }

    /// Keep the terminal open once the script drains: reads block
    /// forever instead of signaling a peer close.
    pub fn hold_open(mut self) -> Self {
        self.hold_open = true;
        self
    }

    /// Queue one more input chunk.
    pub fn push_chunk(&mut self, chunk: &[u8]) {
        self.chunks.push_back(Bytes::copy_from_slice(chunk));
    }

    /// Queue a line of input followed by a carriage return.
    pub fn push_line(&mut self, line: &str) {
        let mut chunk = line.as_bytes().to_vec();
        chunk.push(b'\r');
        self.chunks.push_back(Bytes::from(chunk));
    }

    /// Handle for reading output after the session takes ownership.
    pub fn output_handle(&self) -> TerminalOutput {
        TerminalOutput(Arc::clone(&self.output))
    }

    /// Everything the session wrote so far.
    pub fn output(&self) -> Vec<u8> {
        self.output_handle().bytes()
    }

    /// Output decoded for assertions on user-visible text.
    pub fn output_string(&self) -> String {
        self.output_handle().text()
    }
}

#[async_trait]
impl Terminal for ScriptedTerminal {
    async fn read_chunk(&mut self, _max: usize) -> Result<Bytes> {
        match self.chunks.pop_front() {
            Some(chunk) => Ok(chunk),
            None if self.hold_open => std::future::pending().await,
            None => Ok(Bytes::new()),
        }
    }

    async fn write_all(&mut self, data: &[u8]) -> Result<()> {
        self.output
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .extend_from_slice(data);
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

//! Byte-level input line editor.
//!
//! Reconstructs editing semantics from an unbuffered, chunked byte
//! stream: backspace with bell-on-empty-delete, rejection of escape
//! sequences, and line completion on a terminator byte. All branches
//! are pure byte transformations; the only blocking point is the
//! terminal read itself.

use tracing::trace;

use crate::constants::{
    BACKSPACE_CHUNKS, BELL, ERASE_SEQUENCE, ESC, LINE_ACK, LINE_TERMINATORS, MAX_READ_CHUNK,
    TERMINATOR_CHUNKS, UNSUPPORTED_SEQUENCES,
};
use crate::error::{Error, Result};
use crate::terminal::Terminal;

/// Outcome of feeding one raw chunk to the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditEvent {
    /// Chunk consumed; echo these bytes (possibly none) and keep reading.
    Pending(Vec<u8>),
    /// A logical line completed; echo the bytes, then hand the line up.
    Complete(Vec<u8>, String),
}

/// Incremental editor for the line currently being typed.
///
/// The edit buffer lives across chunks within one line and is cleared
/// when the line is emitted or the peer disconnects.
#[derive(Debug, Default)]
pub struct LineEditor {
    buffer: Vec<u8>,
}

impl LineEditor {
    /// Create an editor with an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether nothing has been typed on the current line.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Drop any partially typed line.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Read chunks from `term` until one logical line completes.
    ///
    /// Echo and correction bytes are written back as a side channel.
    /// Returns [`Error::ConnectionClosed`] on a zero-length read; the
    /// partial line is discarded.
    pub async fn read_line<T: Terminal + ?Sized>(&mut self, term: &mut T) -> Result<String> {
        loop {
            let chunk = term.read_chunk(MAX_READ_CHUNK).await?;
            if chunk.is_empty() {
                self.buffer.clear();
                return Err(Error::ConnectionClosed);
            }
            match self.process(&chunk) {
                EditEvent::Pending(echo) => {
                    if !echo.is_empty() {
                        term.write_all(&echo).await?;
                    }
                }
                EditEvent::Complete(echo, line) => {
                    term.write_all(&echo).await?;
                    return Ok(line);
                }
            }
        }
    }

    /// Apply one non-empty chunk to the edit buffer.
    ///
    /// A terminator is only recognized in final-byte position; a
    /// terminator embedded mid-chunk with trailing bytes after it is
    /// appended like ordinary input (observed upstream behavior, kept
    /// deliberately).
    pub fn process(&mut self, chunk: &[u8]) -> EditEvent {
        if BACKSPACE_CHUNKS.contains(&chunk) {
            return if self.buffer.pop().is_some() {
                EditEvent::Pending(ERASE_SEQUENCE.to_vec())
            } else {
                EditEvent::Pending(BELL.to_vec())
            };
        }

        if chunk.first() == Some(&ESC) || UNSUPPORTED_SEQUENCES.contains(&chunk) {
            trace!(len = chunk.len(), "Discarding unsupported input sequence");
            return EditEvent::Pending(Vec::new());
        }

        if TERMINATOR_CHUNKS.contains(&chunk) {
            return EditEvent::Complete(LINE_ACK.to_vec(), self.take_line());
        }

        if chunk.len() > 1 && chunk.last().is_some_and(|b| LINE_TERMINATORS.contains(b)) {
            let mut echo = chunk.to_vec();
            echo.extend_from_slice(LINE_ACK);
            self.buffer.extend_from_slice(&chunk[..chunk.len() - 1]);
            return EditEvent::Complete(echo, self.take_line());
        }

        self.buffer.extend_from_slice(chunk);
        EditEvent::Pending(chunk.to_vec())
    }

    fn take_line(&mut self) -> String {
        let raw = std::mem::take(&mut self.buffer);
        String::from_utf8_lossy(&raw).trim().to_string()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bytes::Bytes;
    use std::collections::VecDeque;

    /// Scripted terminal: queued read chunks, captured echo bytes.
    struct ScriptTerm {
        chunks: VecDeque<Bytes>,
        echoed: Vec<u8>,
    }

    impl ScriptTerm {
        fn new(script: &[&[u8]]) -> Self {
            Self {
                chunks: script.iter().map(|c| Bytes::copy_from_slice(c)).collect(),
                echoed: Vec::new(),
            }
        }
    }

    #[async_trait]
    impl Terminal for ScriptTerm {
        async fn read_chunk(&mut self, _max: usize) -> Result<Bytes> {
            Ok(self.chunks.pop_front().unwrap_or_default())
        }

        async fn write_all(&mut self, data: &[u8]) -> Result<()> {
            self.echoed.extend_from_slice(data);
            Ok(())
        }
    }

    fn drive(editor: &mut LineEditor, chunks: &[&[u8]]) -> Option<String> {
        for chunk in chunks {
            if let EditEvent::Complete(_, line) = editor.process(chunk) {
                return Some(line);
            }
        }
        None
    }

    #[test]
    fn plain_bytes_echo_and_accumulate() {
        let mut editor = LineEditor::new();
        let event = editor.process(b"ab");
        assert_eq!(event, EditEvent::Pending(b"ab".to_vec()));
        assert!(!editor.is_empty());
    }

    #[test]
    fn bare_terminator_completes_line() {
        let mut editor = LineEditor::new();
        editor.process(b"ab");
        let event = editor.process(b"\r");
        assert_eq!(event, EditEvent::Complete(LINE_ACK.to_vec(), "ab".to_string()));
        assert!(editor.is_empty());
    }

    #[test]
    fn crlf_chunk_is_a_bare_terminator() {
        let mut editor = LineEditor::new();
        editor.process(b"ok");
        let event = editor.process(b"\r\n");
        assert_eq!(event, EditEvent::Complete(LINE_ACK.to_vec(), "ok".to_string()));
    }

    #[test]
    fn multi_byte_chunk_with_final_terminator_completes() {
        let mut editor = LineEditor::new();
        let event = editor.process(b"ab\r");
        let mut expected_echo = b"ab\r".to_vec();
        expected_echo.extend_from_slice(LINE_ACK);
        assert_eq!(event, EditEvent::Complete(expected_echo, "ab".to_string()));
    }

    #[test]
    fn terminator_mid_chunk_does_not_split() {
        // Only a final-byte terminator completes the line; an embedded
        // one is buffered like ordinary input.
        let mut editor = LineEditor::new();
        let event = editor.process(b"a\rb");
        assert_eq!(event, EditEvent::Pending(b"a\rb".to_vec()));
        let line = drive(&mut editor, &[b"\r"]).unwrap();
        assert_eq!(line, "a\rb");
    }

    #[test]
    fn backspace_pops_and_echoes_erase() {
        let mut editor = LineEditor::new();
        editor.process(b"ab");
        let event = editor.process(b"\x7f");
        assert_eq!(event, EditEvent::Pending(ERASE_SEQUENCE.to_vec()));
        let line = drive(&mut editor, &[b"\r"]).unwrap();
        assert_eq!(line, "a");
    }

    #[test]
    fn backspace_byte_0x08_is_recognized_too() {
        let mut editor = LineEditor::new();
        editor.process(b"xy");
        let event = editor.process(b"\x08");
        assert_eq!(event, EditEvent::Pending(ERASE_SEQUENCE.to_vec()));
    }

    #[test]
    fn backspace_on_empty_buffer_rings_bell() {
        let mut editor = LineEditor::new();
        let event = editor.process(b"\x7f");
        assert_eq!(event, EditEvent::Pending(BELL.to_vec()));
        // Still empty, still no error, no matter how often.
        let event = editor.process(b"\x7f");
        assert_eq!(event, EditEvent::Pending(BELL.to_vec()));
    }

    #[test]
    fn escape_sequences_are_discarded() {
        let mut editor = LineEditor::new();
        assert_eq!(editor.process(b"\x1b[A"), EditEvent::Pending(Vec::new()));
        assert_eq!(editor.process(b"\x1b"), EditEvent::Pending(Vec::new()));
        assert!(editor.is_empty());
    }

    #[test]
    fn denylisted_sequences_are_discarded() {
        let mut editor = LineEditor::new();
        assert_eq!(editor.process(b"\t"), EditEvent::Pending(Vec::new()));
        assert!(editor.is_empty());
    }

    #[test]
    fn emitted_line_is_trimmed() {
        let mut editor = LineEditor::new();
        editor.process(b"  web1  ");
        let line = drive(&mut editor, &[b"\r"]).unwrap();
        assert_eq!(line, "web1");
    }

    #[test]
    fn chunk_boundary_independence() {
        // Feeding byte-by-byte and feeding one chunk must produce the
        // identical logical line.
        let input = b"hello\r";

        let mut bytewise = LineEditor::new();
        let mut bytewise_line = None;
        for byte in input {
            if let EditEvent::Complete(_, line) = bytewise.process(&[*byte]) {
                bytewise_line = Some(line);
            }
        }

        let mut whole = LineEditor::new();
        let whole_line = match whole.process(input) {
            EditEvent::Complete(_, line) => Some(line),
            EditEvent::Pending(_) => None,
        };

        assert_eq!(bytewise_line, Some("hello".to_string()));
        assert_eq!(bytewise_line, whole_line);
    }

    #[test]
    fn chunk_boundary_independence_with_editing() {
        let mut split = LineEditor::new();
        let split_line = drive(&mut split, &[b"we", b"bb", b"\x7f", b"1", b"\r"]).unwrap();

        let mut merged = LineEditor::new();
        let merged_line = drive(&mut merged, &[b"webb", b"\x7f", b"1\r"]).unwrap();

        assert_eq!(split_line, "web1");
        assert_eq!(split_line, merged_line);
    }

    #[tokio::test]
    async fn read_line_single_byte_chunks() {
        let mut term = ScriptTerm::new(&[b"a", b"b", b"\r"]);
        let mut editor = LineEditor::new();
        let line = editor.read_line(&mut term).await.unwrap();
        assert_eq!(line, "ab");
        // Echo: both bytes plus the completion acknowledgment.
        assert_eq!(term.echoed, b"ab\r\n");
    }

    #[tokio::test]
    async fn read_line_whole_chunk_matches() {
        let mut term = ScriptTerm::new(&[b"ab\r"]);
        let mut editor = LineEditor::new();
        let line = editor.read_line(&mut term).await.unwrap();
        assert_eq!(line, "ab");
    }

    #[tokio::test]
    async fn read_line_propagates_disconnect() {
        let mut term = ScriptTerm::new(&[b"partial"]);
        let mut editor = LineEditor::new();
        let err = editor.read_line(&mut term).await.unwrap_err();
        assert!(matches!(err, Error::ConnectionClosed));
        // The partial line does not leak into the next invocation.
        assert!(editor.is_empty());
    }

    #[tokio::test]
    async fn read_line_echoes_bell_without_erroring() {
        let mut term = ScriptTerm::new(&[b"\x7f", b"q", b"\r"]);
        let mut editor = LineEditor::new();
        let line = editor.read_line(&mut term).await.unwrap();
        assert_eq!(line, "q");
        assert!(term.echoed.starts_with(BELL));
    }
}

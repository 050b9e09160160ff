//! Control bytes and configuration constants for gatehouse.

// =============================================================================
// Terminal Control Bytes
// =============================================================================

/// Escape introducer byte. Chunks starting with it never enter the edit buffer.
pub const ESC: u8 = 0x1b;

/// Alert signal echoed when deleting from an empty edit buffer.
pub const BELL: &[u8] = b"\x07";

/// Chunks recognized as a destructive backspace keypress.
pub const BACKSPACE_CHUNKS: &[&[u8]] = &[b"\x7f", b"\x08"];

/// Erase sequence echoed after a successful backspace (back up, erase to EOL).
pub const ERASE_SEQUENCE: &[u8] = b"\x08\x1b[K";

/// Byte values that complete a logical line when final in a chunk.
pub const LINE_TERMINATORS: &[u8] = &[b'\r', b'\n'];

/// Chunks equal to a bare line terminator.
pub const TERMINATOR_CHUNKS: &[&[u8]] = &[b"\r", b"\n", b"\r\n"];

/// Acknowledgment echoed when a line completes.
pub const LINE_ACK: &[u8] = b"\r\n";

/// Input sequences with no supported editing semantics; silently dropped.
pub const UNSUPPORTED_SEQUENCES: &[&[u8]] = &[
    b"\t", // completion is not supported
    b"\x1b[A",
    b"\x1b[B",
    b"\x1b[C",
    b"\x1b[D",
    b"\x1b[3~",
];

/// Clears the screen and homes the cursor ahead of the banner.
pub const CLEAR_SCREEN: &[u8] = b"\x1b[2J\x1b[H";

// =============================================================================
// Session Defaults
// =============================================================================

/// Prompt shown before each logical line is read.
pub const DEFAULT_PROMPT: &str = "Opt> ";

/// Upper bound passed to each terminal read.
pub const MAX_READ_CHUNK: usize = 10;

/// Terminal width assumed when the session does not report one.
pub const DEFAULT_TERM_WIDTH: usize = 80;

/// Default port for the standalone gateway listener.
pub const DEFAULT_LISTEN_PORT: u16 = 2222;

/// Buffer size for forwarded session data.
pub const FORWARD_BUFFER_SIZE: usize = 8 * 1024;

// =============================================================================
// Listing Layout Minimums
// =============================================================================

/// Minimum width of the numeric ID column in resource listings.
pub const MIN_ID_WIDTH: usize = 3;

/// Minimum width of the numeric ID column in group listings.
pub const MIN_GROUP_ID_WIDTH: usize = 5;

/// Minimum width of name/hostname columns.
pub const MIN_NAME_WIDTH: usize = 15;

/// Minimum width of the network address column.
pub const MIN_ADDRESS_WIDTH: usize = 15;

/// Minimum width of the login identity column.
pub const MIN_LOGIN_WIDTH: usize = 10;

/// Minimum width of the member-count column.
pub const MIN_MEMBERS_WIDTH: usize = 10;

/// Minimum width of the trailing comment column.
pub const MIN_COMMENT_WIDTH: usize = 7;

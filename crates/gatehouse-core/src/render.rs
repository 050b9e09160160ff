//! Fixed-column table rendering for terminal listings.
//!
//! Columns are described by explicit (accessor, minimum width,
//! alignment) tuples so the renderer stays decoupled from any
//! particular row shape. Widths grow to the longest field among the
//! displayed rows; the last column absorbs the remaining terminal
//! width and is truncated to it.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Notice rendered in place of a table when the row set is empty.
pub const EMPTY_NOTICE: &str = "Nothing match";

/// Cell alignment within a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Right,
}

/// One table column: header, minimum width, alignment, field accessor.
pub struct Column<T> {
    pub header: &'static str,
    pub min_width: usize,
    pub align: Align,
    pub field: fn(&T) -> String,
}

/// Render rows as a fixed-column table sized for `term_width`.
///
/// An empty row set renders the "nothing found" notice instead. The
/// output uses `\r\n` line endings for raw terminal mode and ends with
/// a `Total: N` trailer.
pub fn render_table<T>(columns: &[Column<T>], rows: &[T], term_width: usize) -> String {
    if rows.is_empty() {
        return format!("{}\r\n", warning(EMPTY_NOTICE));
    }

    let widths = column_widths(columns, rows, term_width);

    let mut out = String::new();
    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(col, width)| pad(col.header, *width, col.align))
        .collect();
    out.push_str(&title(&header.join(" ")));
    out.push_str("\r\n");

    let last = columns.len().saturating_sub(1);
    for row in rows {
        let cells: Vec<String> = columns
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(i, (col, width))| {
                let value = (col.field)(row);
                let value = if i == last {
                    truncate_to_width(&value, *width)
                } else {
                    value
                };
                pad(&value, *width, col.align)
            })
            .collect();
        out.push_str(cells.join(" ").trim_end());
        out.push_str("\r\n");
    }

    out.push_str("\r\n");
    out.push_str(&format!("Total: {}\r\n", rows.len()));
    out
}

/// Resolve per-column widths from minimums, headers, and row contents.
fn column_widths<T>(columns: &[Column<T>], rows: &[T], term_width: usize) -> Vec<usize> {
    let mut widths: Vec<usize> = columns
        .iter()
        .map(|col| col.min_width.max(col.header.width()))
        .collect();
    for row in rows {
        for (col, width) in columns.iter().zip(widths.iter_mut()) {
            *width = (*width).max((col.field)(row).width());
        }
    }

    // The last column takes whatever terminal width the others leave.
    if let Some((last, rest)) = widths.split_last_mut() {
        let used: usize = rest.iter().map(|w| w + 1).sum();
        let min = columns.last().map_or(0, |col| col.min_width);
        *last = term_width.saturating_sub(used).max(min);
    }
    widths
}

fn pad(value: &str, width: usize, align: Align) -> String {
    let current = value.width();
    if current >= width {
        return value.to_string();
    }
    let fill = " ".repeat(width - current);
    match align {
        Align::Left => format!("{value}{fill}"),
        Align::Right => format!("{fill}{value}"),
    }
}

/// Truncate to a display width, never splitting a wide character.
fn truncate_to_width(value: &str, width: usize) -> String {
    if value.width() <= width {
        return value.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in value.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out
}

// =============================================================================
// Styling
// =============================================================================

/// Bold green, used for the banner heading and table headers.
pub fn title(text: &str) -> String {
    format!("\x1b[1;32m{text}\x1b[0m")
}

/// Green highlight for menu keys.
pub fn primary(text: &str) -> String {
    format!("\x1b[32m{text}\x1b[0m")
}

/// Red notice for empty results and failures.
pub fn warning(text: &str) -> String {
    format!("\x1b[31m{text}\x1b[0m")
}

// =============================================================================
// Tests
// =============================================================================

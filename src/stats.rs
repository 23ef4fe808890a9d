//! Document statistics: character, word and line counts, cursor position.

use crate::text::TextBuffer;

/// Counts shown in the status bar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub chars: usize,
    pub words: usize,
    pub lines: usize,
}

impl Stats {
    /// Compute counts for a string.
    #[must_use]
    pub fn of(text: &str) -> Self {
        Self {
            chars: char_count(text),
            words: word_count(text),
            lines: line_count(text),
        }
    }

    /// Compute counts for a buffer, using the rope for chars and lines.
    #[must_use]
    pub fn for_buffer(buf: &TextBuffer) -> Self {
        Self {
            chars: buf.len_chars(),
            words: word_count(&buf.text()),
            lines: buf.len_lines(),
        }
    }
}

/// Number of characters.
#[must_use]
pub fn char_count(text: &str) -> usize {
    text.chars().count()
}

/// Number of whitespace-delimited tokens; 0 for blank text.
#[must_use]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Number of lines: `1 + count('\n')`, so an empty document has one line.
#[must_use]
pub fn line_count(text: &str) -> usize {
    1 + text.matches('\n').count()
}

/// 1-based `(line, column)` of a char offset. The offset is clamped to the text.
#[must_use]
pub fn cursor_line_column(text: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut column = 1;
    for ch in text.chars().take(offset) {
        if ch == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }
    (line, column)
}

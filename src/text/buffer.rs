//! Text buffer with a clamped selection.
//!
//! [`TextBuffer`] owns the document text and the selection range. Every
//! mutation re-clamps the selection so that
//! `0 <= start <= end <= len_chars()` always holds.

use crate::text::line_ops::EditResult;
use crate::text::rope::LineRope;

/// A contiguous character range `[start, end]`. An empty range is a cursor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Selection {
    /// First selected character offset.
    pub start: usize,
    /// One past the last selected character offset.
    pub end: usize,
}

impl Selection {
    /// Create a selection, swapping reversed bounds.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// A collapsed selection at `offset`.
    #[must_use]
    pub fn cursor(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Check if this is a bare cursor.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Number of selected characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Clamp both ends into `[0, len]`.
    #[must_use]
    pub fn clamp(self, len: usize) -> Self {
        Self::new(self.start.min(len), self.end.min(len))
    }
}

/// The in-memory document: text plus selection.
#[derive(Clone, Debug, Default)]
pub struct TextBuffer {
    rope: LineRope,
    selection: Selection,
}

impl TextBuffer {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer with initial text and the cursor at 0.
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        Self {
            rope: LineRope::from_str(text),
            selection: Selection::default(),
        }
    }

    /// Full text content.
    #[must_use]
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Underlying rope.
    #[must_use]
    pub fn rope(&self) -> &LineRope {
        &self.rope
    }

    /// Length in characters.
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Number of `\n`-separated lines (at least 1).
    #[must_use]
    pub fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rope.is_empty()
    }

    /// Current selection.
    #[must_use]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Replace the text, keeping the selection clamped to the new length.
    pub fn set_content(&mut self, text: &str) {
        self.rope.replace(text);
        self.clamp_selection();
    }

    /// Set the selection; out-of-range values are clamped, reversed ones swapped.
    pub fn set_selection(&mut self, start: usize, end: usize) {
        self.selection = Selection::new(start, end).clamp(self.len_chars());
    }

    /// Move the cursor, collapsing any selection.
    pub fn set_cursor(&mut self, offset: usize) {
        self.set_selection(offset, offset);
    }

    /// Select the whole document.
    pub fn select_all(&mut self) {
        self.selection = Selection::new(0, self.len_chars());
    }

    /// Splice `text` in at `position` and return the cursor after it.
    ///
    /// The cursor is left collapsed at the returned offset.
    pub fn insert_at(&mut self, text: &str, position: usize) -> usize {
        let position = position.min(self.len_chars());
        self.rope.insert(position, text);
        let cursor = position + text.chars().count();
        self.set_cursor(cursor);
        cursor
    }

    /// Replace the selected range with `text` and return the new cursor.
    pub fn replace_selection(&mut self, text: &str) -> usize {
        let Selection { start, end } = self.selection;
        self.rope.remove(start..end);
        self.insert_at(text, start)
    }

    /// Adopt the content and selection produced by a line operation.
    pub fn apply(&mut self, result: EditResult) {
        self.rope.replace(&result.content);
        self.selection = result.selection.clamp(self.len_chars());
    }

    /// Line index (0-based) containing `offset`.
    #[must_use]
    pub fn line_of(&self, offset: usize) -> usize {
        self.rope.char_to_line(offset)
    }

    /// Line index containing the selection start.
    #[must_use]
    pub fn current_line(&self) -> usize {
        self.line_of(self.selection.start)
    }

    /// First char offset of `line`.
    #[must_use]
    pub fn line_start(&self, line: usize) -> usize {
        self.rope.line_start(line)
    }

    /// Char offset of the end of `line`, excluding the newline.
    #[must_use]
    pub fn line_end(&self, line: usize) -> usize {
        self.rope.line_end(line)
    }

    /// Text of `line` without the newline.
    #[must_use]
    pub fn line_text(&self, line: usize) -> String {
        self.rope.line_text(line)
    }

    fn clamp_selection(&mut self) {
        self.selection = self.selection.clamp(self.len_chars());
    }
}

impl From<&str> for TextBuffer {
    fn from(text: &str) -> Self {
        Self::with_text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_content_round_trip() {
        let mut buf = TextBuffer::new();
        for text in ["", "\n", "\n\n\n", "abc", "héllo\nwörld"] {
            buf.set_content(text);
            assert_eq!(buf.text(), text);
        }
    }

    #[test]
    fn test_set_content_clamps_selection() {
        let mut buf = TextBuffer::with_text("Hello, world!");
        buf.set_selection(7, 12);
        buf.set_content("Hi");
        assert_eq!(buf.selection(), Selection::new(2, 2));
    }

    #[test]
    fn test_set_selection_clamps_and_orders() {
        let mut buf = TextBuffer::with_text("abc");
        buf.set_selection(10, 1);
        assert_eq!(buf.selection(), Selection::new(1, 3));
        buf.set_selection(2, 2);
        assert!(buf.selection().is_empty());
    }

    #[test]
    fn test_insert_at() {
        let mut buf = TextBuffer::with_text("Hello!");
        let cursor = buf.insert_at(", world", 5);
        assert_eq!(buf.text(), "Hello, world!");
        assert_eq!(cursor, 12);
        assert_eq!(buf.selection(), Selection::cursor(12));

        let cursor = buf.insert_at("?", 999);
        assert_eq!(cursor, 14);
        assert_eq!(buf.text(), "Hello, world!?");
    }

    #[test]
    fn test_replace_selection() {
        let mut buf = TextBuffer::with_text("Hello world");
        buf.set_selection(6, 11);
        let cursor = buf.replace_selection("there 👋");
        assert_eq!(buf.text(), "Hello there 👋");
        assert_eq!(cursor, 13);
    }

    #[test]
    fn test_line_queries() {
        let buf = TextBuffer::with_text("line1\nline2\nline3");
        assert_eq!(buf.len_lines(), 3);
        assert_eq!(buf.line_of(8), 1);
        assert_eq!(buf.line_start(1), 6);
        assert_eq!(buf.line_end(1), 11);
        assert_eq!(buf.line_text(2), "line3");
    }

    #[test]
    fn test_select_all() {
        let mut buf = TextBuffer::with_text("abc\ndef");
        buf.select_all();
        assert_eq!(buf.selection(), Selection::new(0, 7));
    }
}

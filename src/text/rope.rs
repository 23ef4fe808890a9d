//! Rope wrapper using the ropey crate.
//!
//! ropey is built without `cr_lines`/`unicode_lines`, so `\n` is the only
//! line separator. A trailing `\n` opens an empty final line, which matches
//! splitting the text on `\n`.

use ropey::Rope;
use std::ops::Range;

/// Wrapper around [`ropey::Rope`] with line-oriented, clamping accessors.
///
/// All indices are character offsets. Out-of-range inputs are clamped
/// instead of panicking.
#[derive(Clone, Debug, Default)]
pub struct LineRope {
    rope: Rope,
}

impl LineRope {
    /// Create an empty rope.
    #[must_use]
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Create a rope from a string.
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        Self {
            rope: Rope::from_str(s),
        }
    }

    /// Get the number of characters.
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Get the number of lines. Never zero.
    #[must_use]
    pub fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rope.len_bytes() == 0
    }

    /// Line index (0-based) containing `char_idx`.
    #[must_use]
    pub fn char_to_line(&self, char_idx: usize) -> usize {
        self.rope.char_to_line(char_idx.min(self.len_chars()))
    }

    /// Convert char index to byte index.
    #[must_use]
    pub fn char_to_byte(&self, char_idx: usize) -> usize {
        self.rope.char_to_byte(char_idx.min(self.len_chars()))
    }

    /// Char offset where `line_idx` starts.
    #[must_use]
    pub fn line_start(&self, line_idx: usize) -> usize {
        if line_idx >= self.len_lines() {
            self.len_chars()
        } else {
            self.rope.line_to_char(line_idx)
        }
    }

    /// Char offset where `line_idx` ends, excluding its `\n`.
    #[must_use]
    pub fn line_end(&self, line_idx: usize) -> usize {
        if line_idx >= self.len_lines() {
            return self.len_chars();
        }
        let line = self.rope.line(line_idx);
        let len = line.len_chars();
        let has_newline = len > 0 && line.char(len - 1) == '\n';
        self.line_start(line_idx) + if has_newline { len - 1 } else { len }
    }

    /// Text of `line_idx` without its `\n`.
    #[must_use]
    pub fn line_text(&self, line_idx: usize) -> String {
        self.slice_string(self.line_start(line_idx)..self.line_end(line_idx))
    }

    /// Copy a char range out as a string.
    #[must_use]
    pub fn slice_string(&self, range: Range<usize>) -> String {
        let end = range.end.min(self.len_chars());
        let start = range.start.min(end);
        self.rope.slice(start..end).to_string()
    }

    /// Insert text at a character position (clamped).
    pub fn insert(&mut self, char_idx: usize, text: &str) {
        let idx = char_idx.min(self.len_chars());
        self.rope.insert(idx, text);
    }

    /// Remove a range of characters (clamped).
    pub fn remove(&mut self, range: Range<usize>) {
        let end = range.end.min(self.len_chars());
        let start = range.start.min(end);
        self.rope.remove(start..end);
    }

    /// Replace the entire contents.
    pub fn replace(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
    }

    /// Convert to string.
    #[must_use]
    pub fn to_string(&self) -> String {
        self.rope.to_string()
    }
}

impl From<&str> for LineRope {
    fn from(s: &str) -> Self {
        Self::from_str(s)
    }
}

//! Cursor-aware line operations.
//!
//! Every operation reads a [`TextBuffer`] snapshot and returns an
//! [`EditResult`] describing the new text and selection; nothing here
//! mutates the buffer. "The current line" is always the line containing
//! the selection start.
//!
//! # Examples
//!
//! ```
//! use plainpad::text::{LineOps, TextBuffer};
//!
//! let mut buf = TextBuffer::with_text("hello world");
//! buf.set_cursor(5);
//! let result = LineOps::default().tab(&buf, false);
//! assert_eq!(result.content, "hello     world");
//! assert_eq!(result.selection.start, 9);
//! ```

use crate::text::buffer::{Selection, TextBuffer};

/// Default number of spaces inserted by Tab.
pub const DEFAULT_INDENT_WIDTH: usize = 4;

/// Default line comment token.
pub const DEFAULT_COMMENT_TOKEN: &str = "//";

/// Outcome of a line operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditResult {
    /// Buffer content after the operation.
    pub content: String,
    /// Selection after the operation, clamped to `content`.
    pub selection: Selection,
}

impl EditResult {
    /// Build a result, clamping the selection to the new content.
    #[must_use]
    pub fn new(content: String, selection: Selection) -> Self {
        let len = content.chars().count();
        Self {
            content,
            selection: selection.clamp(len),
        }
    }

    fn unchanged(buf: &TextBuffer) -> Self {
        Self {
            content: buf.text(),
            selection: buf.selection(),
        }
    }
}

/// Line operations parameterized by indent width and comment token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineOps {
    indent_width: usize,
    comment_token: String,
}

impl Default for LineOps {
    fn default() -> Self {
        Self::new(DEFAULT_INDENT_WIDTH, DEFAULT_COMMENT_TOKEN)
    }
}

impl LineOps {
    /// Create line operations with a custom indent width and comment token.
    #[must_use]
    pub fn new(indent_width: usize, comment_token: &str) -> Self {
        Self {
            indent_width: indent_width.max(1),
            comment_token: comment_token.to_string(),
        }
    }

    /// Spaces inserted per indent level.
    #[must_use]
    pub fn indent_width(&self) -> usize {
        self.indent_width
    }

    /// Token toggled by [`toggle_comment`](Self::toggle_comment).
    #[must_use]
    pub fn comment_token(&self) -> &str {
        &self.comment_token
    }

    /// Tab / Shift+Tab.
    ///
    /// With a bare cursor, Tab inserts spaces and Shift+Tab strips leading
    /// spaces from the current line. With a selection, every touched line is
    /// indented or unindented.
    #[must_use]
    pub fn tab(&self, buf: &TextBuffer, shift: bool) -> EditResult {
        match (buf.selection().is_empty(), shift) {
            (true, false) => self.insert_indent(buf),
            (true, true) => self.unindent_at_cursor(buf),
            (false, false) => self.indent_lines(buf),
            (false, true) => self.unindent_lines(buf),
        }
    }

    fn indent_str(&self) -> String {
        " ".repeat(self.indent_width)
    }

    /// Count of leading spaces removable from `line`, capped at the indent width.
    fn removable(&self, line: &str) -> usize {
        line.chars()
            .take(self.indent_width)
            .take_while(|&c| c == ' ')
            .count()
    }

    fn insert_indent(&self, buf: &TextBuffer) -> EditResult {
        let cursor = buf.selection().start;
        let text = buf.text();
        let at = buf.rope().char_to_byte(cursor);
        let mut content = String::with_capacity(text.len() + self.indent_width);
        content.push_str(&text[..at]);
        content.push_str(&self.indent_str());
        content.push_str(&text[at..]);
        EditResult::new(content, Selection::cursor(cursor + self.indent_width))
    }

    fn unindent_at_cursor(&self, buf: &TextBuffer) -> EditResult {
        let cursor = buf.selection().start;
        let line = buf.line_of(cursor);
        let removed = self.removable(&buf.line_text(line));
        if removed == 0 {
            return EditResult::unchanged(buf);
        }

        let line_start = buf.line_start(line);
        let text = buf.text();
        let from = buf.rope().char_to_byte(line_start);
        // Only ASCII spaces are removed, so chars == bytes here.
        let mut content = String::with_capacity(text.len());
        content.push_str(&text[..from]);
        content.push_str(&text[from + removed..]);

        let cursor = cursor.saturating_sub(removed).max(line_start);
        EditResult::new(content, Selection::cursor(cursor))
    }

    fn indent_lines(&self, buf: &TextBuffer) -> EditResult {
        let Selection { start, end } = buf.selection();
        let first = buf.line_of(start);
        let last = buf.line_of(end);
        let touched = last - first + 1;
        let indent = self.indent_str();

        let content = rebuild_lines(buf, first, last, |_, line| format!("{indent}{line}"));
        EditResult::new(
            content,
            Selection::new(
                start + self.indent_width,
                end + self.indent_width * touched,
            ),
        )
    }

    fn unindent_lines(&self, buf: &TextBuffer) -> EditResult {
        let Selection { start, end } = buf.selection();
        let first = buf.line_of(start);
        let last = buf.line_of(end);

        let removed: Vec<usize> = (first..=last)
            .map(|line| self.removable(&buf.line_text(line)))
            .collect();
        if removed.iter().all(|&n| n == 0) {
            return EditResult::unchanged(buf);
        }

        let content = rebuild_lines(buf, first, last, |idx, line| {
            line[removed[idx - first]..].to_string()
        });

        // Offsets inside a line's stripped prefix collapse onto the line start,
        // so the mapping is monotone and never crosses into a previous line.
        let map = |offset: usize, line: usize| {
            let before: usize = removed[..line - first].iter().sum();
            let in_line = removed[line - first].min(offset - buf.line_start(line));
            offset - before - in_line
        };
        EditResult::new(content, Selection::new(map(start, first), map(end, last)))
    }

    /// Insert a copy of the current line below it.
    ///
    /// The cursor keeps its column and moves onto the copy.
    #[must_use]
    pub fn duplicate_line(&self, buf: &TextBuffer) -> EditResult {
        let cursor = buf.selection().start;
        let line = buf.line_of(cursor);
        let line_text = buf.line_text(line);
        let text = buf.text();
        let at = buf.rope().char_to_byte(buf.line_end(line));

        let mut content = String::with_capacity(text.len() + line_text.len() + 1);
        content.push_str(&text[..at]);
        content.push('\n');
        content.push_str(&line_text);
        content.push_str(&text[at..]);

        let cursor = cursor + line_text.chars().count() + 1;
        EditResult::new(content, Selection::cursor(cursor))
    }

    /// Remove the current line.
    ///
    /// A single-line document is cleared. Otherwise the line's trailing newline
    /// (or the preceding one, for the last line) goes with it and the cursor
    /// lands on the start of whatever line takes its place.
    #[must_use]
    pub fn delete_line(&self, buf: &TextBuffer) -> EditResult {
        if buf.len_lines() <= 1 {
            return EditResult::new(String::new(), Selection::cursor(0));
        }

        let line = buf.current_line();
        let line_start = buf.line_start(line);
        let range = if line + 1 == buf.len_lines() {
            line_start - 1..buf.line_end(line)
        } else {
            line_start..buf.line_start(line + 1)
        };

        let text = buf.text();
        let from = buf.rope().char_to_byte(range.start);
        let to = buf.rope().char_to_byte(range.end);
        let mut content = String::with_capacity(text.len());
        content.push_str(&text[..from]);
        content.push_str(&text[to..]);

        let len = content.chars().count();
        EditResult::new(content, Selection::cursor(line_start.min(len)))
    }

    /// Comment or uncomment the current line.
    ///
    /// Leading whitespace is preserved either way. Uncommenting removes the
    /// token and at most one space after it.
    #[must_use]
    pub fn toggle_comment(&self, buf: &TextBuffer) -> EditResult {
        let cursor = buf.selection().start;
        let line = buf.line_of(cursor);
        let line_text = buf.line_text(line);
        let body = line_text.trim_start();
        let indent = &line_text[..line_text.len() - body.len()];
        let pivot = buf.line_start(line) + indent.chars().count();

        let (replacement, cursor) = if let Some(rest) = body.strip_prefix(&self.comment_token) {
            let rest = rest.strip_prefix(' ').unwrap_or(rest);
            let removed = body.chars().count() - rest.chars().count();
            let cursor = cursor - removed.min(cursor.saturating_sub(pivot));
            (format!("{indent}{rest}"), cursor)
        } else {
            let prefix = format!("{} ", self.comment_token);
            let cursor = if cursor > pivot {
                cursor + prefix.chars().count()
            } else {
                cursor
            };
            (format!("{indent}{prefix}{body}"), cursor)
        };

        let content = rebuild_lines(buf, line, line, |_, _| replacement.clone());
        EditResult::new(content, Selection::cursor(cursor))
    }
}

/// Rewrite lines `first..=last`, keeping everything outside them verbatim.
fn rebuild_lines<F>(buf: &TextBuffer, first: usize, last: usize, mut f: F) -> String
where
    F: FnMut(usize, &str) -> String,
{
    let text = buf.text();
    let head = buf.rope().char_to_byte(buf.line_start(first));
    let tail = buf.rope().char_to_byte(buf.line_end(last));

    let mut out = String::with_capacity(text.len() + (last - first + 1) * 8);
    out.push_str(&text[..head]);
    for line in first..=last {
        if line > first {
            out.push('\n');
        }
        out.push_str(&f(line, &buf.line_text(line)));
    }
    out.push_str(&text[tail..]);
    out
}

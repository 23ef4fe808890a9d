//! Text storage and line-oriented editing.
//!
//! Offsets throughout are `char` offsets into the document. Lines are split
//! on `\n` only; a trailing newline opens an empty final line.
//!
//! Key types:
//!
//! - [`TextBuffer`]: rope-backed document plus its selection
//! - [`LineOps`]: indent, duplicate, delete and comment operations
//! - [`search`]: case-insensitive literal find and replace
//!
//! # Examples
//!
//! ```
//! use plainpad::text::{LineOps, TextBuffer};
//!
//! let mut buffer = TextBuffer::with_text("let x = 1;");
//! buffer.set_cursor(4);
//! let result = LineOps::default().toggle_comment(&buffer);
//! buffer.apply(result);
//! assert_eq!(buffer.text(), "// let x = 1;");
//! assert_eq!(buffer.selection().start, 7);
//! ```

mod buffer;
mod line_ops;
mod rope;
pub mod search;

pub use buffer::{Selection, TextBuffer};
pub use line_ops::{DEFAULT_COMMENT_TOKEN, DEFAULT_INDENT_WIDTH, EditResult, LineOps};
pub use rope::LineRope;
pub use search::{Match, find, replace_all};

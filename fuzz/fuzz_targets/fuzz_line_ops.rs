//! Fuzz target for line operations.
//!
//! Replays arbitrary sequences of edits against a buffer and checks that
//! nothing panics and the selection always stays inside the document.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use plainpad::text::{LineOps, TextBuffer, find, replace_all};

#[derive(Arbitrary, Debug)]
enum Op {
    Select { start: u16, end: u16 },
    Tab { shift: bool },
    Duplicate,
    Delete,
    Comment,
    Insert(String),
    Replace { needle: String, replacement: String },
    Find(String),
}

#[derive(Arbitrary, Debug)]
struct Script {
    text: String,
    indent: u8,
    token: String,
    ops: Vec<Op>,
}

fuzz_target!(|script: Script| {
    let ops = LineOps::new(usize::from(script.indent % 16) + 1, &script.token);
    let mut buf = TextBuffer::with_text(&script.text);

    for op in script.ops.into_iter().take(64) {
        match op {
            Op::Select { start, end } => buf.set_selection(start.into(), end.into()),
            Op::Tab { shift } => buf.apply(ops.tab(&buf, shift)),
            Op::Duplicate => buf.apply(ops.duplicate_line(&buf)),
            Op::Delete => buf.apply(ops.delete_line(&buf)),
            Op::Comment if !ops.comment_token().is_empty() => {
                buf.apply(ops.toggle_comment(&buf));
            }
            Op::Comment => {}
            Op::Insert(text) => {
                buf.replace_selection(&text);
            }
            Op::Replace {
                needle,
                replacement,
            } => {
                let (text, _) = replace_all(&buf.text(), &needle, &replacement);
                buf.set_content(&text);
            }
            Op::Find(needle) => {
                if let Some(m) = find(&buf.text(), &needle) {
                    buf.set_selection(m.offset, m.end());
                }
            }
        }

        let sel = buf.selection();
        assert!(sel.start <= sel.end);
        assert!(sel.end <= buf.len_chars());
    }
});

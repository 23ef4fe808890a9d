//! Case-insensitive literal search and replace.
//!
//! The needle is always matched literally: regex metacharacters are escaped
//! before the pattern is compiled. Offsets and lengths are in characters.

use regex::{Regex, RegexBuilder};
use std::ops::Range;

/// Upper bound on the compiled pattern size. Larger needles are matched by a
/// plain character scan instead.
const PATTERN_SIZE_LIMIT: usize = 1 << 22;

/// A located match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Match {
    /// Char offset of the first matched character.
    pub offset: usize,
    /// Length of the match in characters.
    pub len: usize,
}

impl Match {
    /// One past the last matched character.
    #[must_use]
    pub fn end(&self) -> usize {
        self.offset + self.len
    }
}

/// Compiled form of a needle.
enum Pattern {
    Regex(Regex),
    /// Needle too large to compile; matched char by char.
    Scan(Vec<char>),
}

impl Pattern {
    fn new(needle: &str) -> Option<Self> {
        if needle.is_empty() {
            return None;
        }
        let pattern = match RegexBuilder::new(&regex::escape(needle))
            .case_insensitive(true)
            .size_limit(PATTERN_SIZE_LIMIT)
            .build()
        {
            Ok(regex) => Self::Regex(regex),
            Err(e) => {
                tracing::debug!(error = %e, "needle exceeds regex limits, scanning instead");
                Self::Scan(needle.chars().collect())
            }
        };
        Some(pattern)
    }

    /// Byte ranges of non-overlapping matches, left to right.
    fn ranges(&self, text: &str, first_only: bool) -> Vec<Range<usize>> {
        match self {
            Self::Regex(regex) if first_only => {
                regex.find(text).map(|m| m.range()).into_iter().collect()
            }
            Self::Regex(regex) => regex.find_iter(text).map(|m| m.range()).collect(),
            Self::Scan(needle) => scan(text, needle, first_only),
        }
    }
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

fn scan(text: &str, needle: &[char], first_only: bool) -> Vec<Range<usize>> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let byte_at = |i: usize| chars.get(i).map_or(text.len(), |&(b, _)| b);
    let mut found = Vec::new();
    let mut i = 0;
    while i + needle.len() <= chars.len() {
        let hit = chars[i..i + needle.len()]
            .iter()
            .zip(needle)
            .all(|(&(_, a), &b)| chars_eq_ignore_case(a, b));
        if hit {
            found.push(byte_at(i)..byte_at(i + needle.len()));
            if first_only {
                break;
            }
            i += needle.len();
        } else {
            i += 1;
        }
    }
    found
}

/// Find the first case-insensitive occurrence of `needle`.
///
/// An empty needle never matches.
#[must_use]
pub fn find(text: &str, needle: &str) -> Option<Match> {
    let range = Pattern::new(needle)?.ranges(text, true).into_iter().next()?;
    Some(Match {
        offset: text[..range.start].chars().count(),
        len: text[range].chars().count(),
    })
}

/// Replace every case-insensitive occurrence of `needle` with `replacement`.
///
/// The replacement is inserted verbatim (`$1` and friends are not expanded).
/// Returns the new text and the number of replacements made.
#[must_use]
pub fn replace_all(text: &str, needle: &str, replacement: &str) -> (String, usize) {
    let ranges = Pattern::new(needle).map_or_else(Vec::new, |p| p.ranges(text, false));
    if ranges.is_empty() {
        return (text.to_string(), 0);
    }
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for range in &ranges {
        out.push_str(&text[last..range.start]);
        out.push_str(replacement);
        last = range.end;
    }
    out.push_str(&text[last..]);
    (out, ranges.len())
}

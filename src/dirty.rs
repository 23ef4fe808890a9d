//! Unsaved-changes tracking and display names.
//!
//! The dirty flag is never stored: it is always derived by comparing the
//! live content against the content last saved or loaded, so the display
//! name carries the `*` marker exactly when the two differ.

use crate::error::{Error, Result};

/// Suffix appended to the file name while there are unsaved changes.
pub const DIRTY_MARKER: char = '*';

/// Whether `content` differs from what was last persisted.
#[must_use]
pub fn compute_dirty(content: &str, last_persisted: &str) -> bool {
    content != last_persisted
}

/// `base_name` with the dirty marker appended (unless already present) when
/// `dirty`, or with trailing markers stripped otherwise.
#[must_use]
pub fn compute_display_name(base_name: &str, dirty: bool) -> String {
    if !dirty {
        base_name.trim_end_matches(DIRTY_MARKER).to_string()
    } else if base_name.ends_with(DIRTY_MARKER) {
        base_name.to_string()
    } else {
        format!("{base_name}{DIRTY_MARKER}")
    }
}

/// Normalize a user-supplied file name.
///
/// Surrounding whitespace and dirty markers are dropped, and `.txt` is
/// appended unless the name already ends with one of `extensions`
/// (compared ASCII case-insensitively). Blank names are rejected.
pub fn normalize_filename(name: &str, extensions: &[String]) -> Result<String> {
    let name = name.trim().trim_end_matches(DIRTY_MARKER).trim_end();
    if name.is_empty() {
        return Err(Error::InvalidName(name.to_string()));
    }
    let lower = name.to_ascii_lowercase();
    let recognized = extensions
        .iter()
        .any(|ext| lower.ends_with(&ext.to_ascii_lowercase()));
    if recognized {
        Ok(name.to_string())
    } else {
        Ok(format!("{name}.txt"))
    }
}

/// Last-persisted snapshot plus the document's base file name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirtyState {
    last_persisted: String,
    base_name: String,
}

impl DirtyState {
    /// A clean, empty document called `base_name`.
    #[must_use]
    pub fn new(base_name: &str) -> Self {
        Self {
            last_persisted: String::new(),
            base_name: compute_display_name(base_name, false),
        }
    }

    /// Record `content` as saved or loaded.
    pub fn mark_persisted(&mut self, content: &str) {
        content.clone_into(&mut self.last_persisted);
    }

    /// Content at the last save or load.
    #[must_use]
    pub fn last_persisted(&self) -> &str {
        &self.last_persisted
    }

    /// Whether `content` has unsaved changes.
    #[must_use]
    pub fn is_dirty(&self, content: &str) -> bool {
        compute_dirty(content, &self.last_persisted)
    }

    /// File name without the dirty marker.
    #[must_use]
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Rename the document. A stray trailing marker is stripped.
    pub fn set_base_name(&mut self, name: &str) {
        self.base_name = compute_display_name(name, false);
    }

    /// File name as shown to the user for the given live content.
    #[must_use]
    pub fn display_name(&self, content: &str) -> String {
        compute_display_name(&self.base_name, self.is_dirty(content))
    }

    /// Window title, prefixed with `●` while dirty.
    #[must_use]
    pub fn window_title(&self, content: &str, app_title: &str) -> String {
        if self.is_dirty(content) {
            format!("● {} - {app_title}", self.base_name)
        } else {
            format!("{} - {app_title}", self.base_name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn txt() -> Vec<String> {
        vec![".txt".to_string()]
    }

    #[test]
    fn test_display_name_marker() {
        assert_eq!(compute_display_name("notes.txt", true), "notes.txt*");
        assert_eq!(compute_display_name("notes.txt*", true), "notes.txt*");
        assert_eq!(compute_display_name("notes.txt**", true), "notes.txt**");
        assert_eq!(compute_display_name("notes.txt**", false), "notes.txt");
        assert_eq!(compute_display_name("notes.txt*", false), "notes.txt");
        assert_eq!(compute_display_name("notes.txt", false), "notes.txt");
    }

    #[test]
    fn test_mark_persisted_clears_dirty() {
        let mut state = DirtyState::new("a.txt");
        assert!(!state.is_dirty(""));
        assert!(state.is_dirty("x"));
        state.mark_persisted("x");
        assert!(!state.is_dirty("x"));
        assert_eq!(state.display_name("x"), "a.txt");
        assert_eq!(state.display_name("xy"), "a.txt*");
    }

    #[test]
    fn test_normalize_filename() {
        assert_eq!(normalize_filename("notes", &txt()).unwrap(), "notes.txt");
        assert_eq!(normalize_filename(" notes.txt ", &txt()).unwrap(), "notes.txt");
        assert_eq!(normalize_filename("README.TXT", &txt()).unwrap(), "README.TXT");
        assert_eq!(normalize_filename("data.csv", &txt()).unwrap(), "data.csv.txt");
        assert_eq!(normalize_filename(".txt", &txt()).unwrap(), ".txt");
        assert!(normalize_filename("   ", &txt()).is_err());
    }

    #[test]
    fn test_normalize_with_extra_extensions() {
        let exts = vec![".txt".to_string(), ".md".to_string()];
        assert_eq!(normalize_filename("todo.md", &exts).unwrap(), "todo.md");
    }

    #[test]
    fn test_window_title() {
        let mut state = DirtyState::new("draft.txt*");
        assert_eq!(state.base_name(), "draft.txt");
        state.mark_persisted("saved");
        assert_eq!(state.window_title("saved", "Notepad"), "draft.txt - Notepad");
        assert_eq!(state.window_title("edited", "Notepad"), "● draft.txt - Notepad");
    }
}

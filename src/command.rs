//! Typed editor commands.
//!
//! The keymap resolves chords to an [`Action`]. Actions that need input from
//! the user (a file name, a search needle) are completed by the UI into a
//! [`Command`], which the session executes.

use serde::{Deserialize, Serialize};

/// A payload-free editor action, as bound to a key chord.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    Save,
    SaveAs,
    Open,
    New,
    Rename,
    Find,
    Replace,
    SelectAll,
    Duplicate,
    DeleteLine,
    ToggleComment,
    Indent,
    Unindent,
}

impl Action {
    /// Every action, in menu order.
    pub const ALL: [Self; 13] = [
        Self::New,
        Self::Open,
        Self::Save,
        Self::SaveAs,
        Self::Rename,
        Self::Find,
        Self::Replace,
        Self::SelectAll,
        Self::Duplicate,
        Self::DeleteLine,
        Self::ToggleComment,
        Self::Indent,
        Self::Unindent,
    ];

    /// Whether the UI must prompt the user before this can run.
    #[must_use]
    pub fn needs_input(self) -> bool {
        matches!(self, Self::Rename | Self::Find | Self::Replace)
    }

    /// The command for actions that take no input.
    #[must_use]
    pub fn command(self) -> Option<Command> {
        let command = match self {
            Self::Save => Command::Save,
            Self::SaveAs => Command::SaveAs,
            Self::Open => Command::Open,
            Self::New => Command::New,
            Self::SelectAll => Command::SelectAll,
            Self::Duplicate => Command::DuplicateLine,
            Self::DeleteLine => Command::DeleteLine,
            Self::ToggleComment => Command::ToggleComment,
            Self::Indent => Command::Tab { shift: false },
            Self::Unindent => Command::Tab { shift: true },
            Self::Rename | Self::Find | Self::Replace => return None,
        };
        Some(command)
    }
}

/// Something the session can execute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Save,
    SaveAs,
    Open,
    /// Start an empty document. The UI confirms first if there is content.
    New,
    Rename(String),
    Find(String),
    Replace {
        needle: String,
        replacement: String,
    },
    SelectAll,
    DuplicateLine,
    DeleteLine,
    ToggleComment,
    Tab {
        shift: bool,
    },
    /// Replace the selection with typed or pasted text.
    InsertText(String),
    /// Insert an emoji and remember it as recently used.
    InsertEmoji(String),
    /// The host text field changed wholesale.
    SetContent(String),
    SetSelection {
        start: usize,
        end: usize,
    },
}

impl Command {
    /// Whether this command goes through the persistence gateway.
    #[must_use]
    pub fn is_file_operation(&self) -> bool {
        matches!(self, Self::Save | Self::SaveAs | Self::Open)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_actions_have_no_direct_command() {
        for action in Action::ALL {
            assert_eq!(action.needs_input(), action.command().is_none(), "{action:?}");
        }
    }

    #[test]
    fn test_action_names_are_kebab_case() {
        let json = serde_json::to_string(&Action::ToggleComment).unwrap();
        assert_eq!(json, "\"toggle-comment\"");
        let action: Action = serde_json::from_str("\"save-as\"").unwrap();
        assert_eq!(action, Action::SaveAs);
    }

    #[test]
    fn test_tab_actions() {
        assert_eq!(Action::Indent.command(), Some(Command::Tab { shift: false }));
        assert_eq!(Action::Unindent.command(), Some(Command::Tab { shift: true }));
        assert!(Command::Save.is_file_operation());
        assert!(!Command::DeleteLine.is_file_operation());
    }
}

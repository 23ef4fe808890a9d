//! Keyboard event types and chord parsing.

use bitflags::bitflags;
use std::fmt;
use std::str::FromStr;

bitflags! {
    /// Keyboard modifier flags.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        /// Shift key.
        const SHIFT = 0b0000_0001;
        /// Alt/Option key.
        const ALT = 0b0000_0010;
        /// Control key.
        const CTRL = 0b0000_0100;
        /// Super/Meta/Command key.
        const SUPER = 0b0000_1000;
    }
}

/// A key code representing a keyboard key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A character key (includes space). Letters are stored lowercase.
    Char(char),
    /// Tab key.
    Tab,
    /// Shift+Tab as reported by some hosts.
    BackTab,
    Enter,
    Esc,
    Backspace,
    Delete,
    /// Function key (F1-F24).
    F(u8),
}

/// A keyboard event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// The key code.
    pub code: KeyCode,
    /// Modifier keys held.
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    /// Create a new key event.
    #[must_use]
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Create a key event with no modifiers.
    #[must_use]
    pub fn key(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::empty())
    }

    /// Create a Ctrl+char event.
    #[must_use]
    pub fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CTRL)
    }

    /// Check if Shift is held.
    #[must_use]
    pub fn shift(&self) -> bool {
        self.modifiers.contains(KeyModifiers::SHIFT)
    }

    /// Canonical form used for keymap lookups.
    ///
    /// Letters are lowercased (hosts report `S` for Ctrl+Shift+S) and
    /// `BackTab` becomes Shift+Tab.
    #[must_use]
    pub fn normalized(self) -> Self {
        match self.code {
            KeyCode::Char(c) => Self::new(KeyCode::Char(lowercase(c)), self.modifiers),
            KeyCode::BackTab => Self::new(KeyCode::Tab, self.modifiers | KeyModifiers::SHIFT),
            _ => self,
        }
    }
}

fn lowercase(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

/// Error returned when a chord string cannot be parsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseChordError(pub String);

impl fmt::Display for ParseChordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid key chord: {:?}", self.0)
    }
}

impl std::error::Error for ParseChordError {}

impl FromStr for KeyEvent {
    type Err = ParseChordError;

    /// Parse chords like `ctrl+shift+s`, `ctrl+/` or `shift+tab`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseChordError(s.to_string());
        let lower = s.trim().to_lowercase();
        // "ctrl++" binds the plus key itself.
        let (mods, key) = match lower.strip_suffix("++") {
            Some(head) => (head, "+"),
            None => lower.rsplit_once('+').unwrap_or(("", lower.as_str())),
        };

        let mut modifiers = KeyModifiers::empty();
        for part in mods.split('+').filter(|_| !mods.is_empty()) {
            modifiers |= match part {
                "ctrl" | "control" => KeyModifiers::CTRL,
                "shift" => KeyModifiers::SHIFT,
                "alt" | "option" => KeyModifiers::ALT,
                "super" | "meta" | "cmd" => KeyModifiers::SUPER,
                _ => return Err(err()),
            };
        }

        let code = match key {
            "tab" => KeyCode::Tab,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "backspace" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "space" => KeyCode::Char(' '),
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    (Some('f'), Some(_)) => key[1..]
                        .parse::<u8>()
                        .ok()
                        .filter(|n| (1..=24).contains(n))
                        .map(KeyCode::F)
                        .ok_or_else(err)?,
                    _ => return Err(err()),
                }
            }
        };
        Ok(Self::new(code, modifiers).normalized())
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, name) in [
            (KeyModifiers::CTRL, "ctrl"),
            (KeyModifiers::SHIFT, "shift"),
            (KeyModifiers::ALT, "alt"),
            (KeyModifiers::SUPER, "super"),
        ] {
            if self.modifiers.contains(flag) {
                write!(f, "{name}+")?;
            }
        }
        match self.code {
            KeyCode::Char(' ') => write!(f, "space"),
            KeyCode::Char(c) => write!(f, "{c}"),
            KeyCode::Tab => write!(f, "tab"),
            KeyCode::BackTab => write!(f, "shift+tab"),
            KeyCode::Enter => write!(f, "enter"),
            KeyCode::Esc => write!(f, "esc"),
            KeyCode::Backspace => write!(f, "backspace"),
            KeyCode::Delete => write!(f, "delete"),
            KeyCode::F(n) => write!(f, "f{n}"),
        }
    }
}

//! Chord → action table.

use crate::command::Action;
use crate::config::EditorConfig;
use crate::error::{Error, Result};
use crate::input::keyboard::KeyEvent;
use std::collections::HashMap;

/// Bindings installed by [`Keymap::default`].
///
/// Undo/redo chords are absent: the host's native undo handles them.
pub const DEFAULT_BINDINGS: &[(&str, Action)] = &[
    ("ctrl+s", Action::Save),
    ("ctrl+shift+s", Action::SaveAs),
    ("ctrl+o", Action::Open),
    ("ctrl+n", Action::New),
    ("ctrl+r", Action::Rename),
    ("ctrl+f", Action::Find),
    ("ctrl+shift+f", Action::Replace),
    ("ctrl+a", Action::SelectAll),
    ("ctrl+shift+d", Action::Duplicate),
    ("ctrl+shift+k", Action::DeleteLine),
    ("ctrl+/", Action::ToggleComment),
    ("tab", Action::Indent),
    ("shift+tab", Action::Unindent),
];

/// Maps normalized key events to actions.
#[derive(Clone, Debug)]
pub struct Keymap {
    bindings: HashMap<KeyEvent, Action>,
}

impl Default for Keymap {
    fn default() -> Self {
        let mut keymap = Self::empty();
        for (chord, action) in DEFAULT_BINDINGS {
            if let Ok(event) = chord.parse::<KeyEvent>() {
                keymap.bindings.insert(event, *action);
            }
        }
        keymap
    }
}

impl Keymap {
    /// A keymap with no bindings.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Default bindings with `overrides` layered on top.
    pub fn with_overrides<'a, I>(overrides: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a String, &'a Action)>,
    {
        let mut keymap = Self::default();
        for (chord, action) in overrides {
            keymap.bind(chord, *action)?;
        }
        Ok(keymap)
    }

    /// Default bindings with the config's `keybindings` layered on top.
    pub fn from_config(config: &EditorConfig) -> Result<Self> {
        Self::with_overrides(&config.keybindings)
    }

    /// Bind `chord` to `action`, replacing any previous binding.
    pub fn bind(&mut self, chord: &str, action: Action) -> Result<()> {
        let event = chord
            .parse::<KeyEvent>()
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;
        if let Some(previous) = self.bindings.insert(event, action) {
            tracing::debug!(%event, ?previous, ?action, "rebound key chord");
        }
        Ok(())
    }

    /// Remove the binding for `chord`, if any.
    pub fn unbind(&mut self, chord: &str) -> Option<Action> {
        let event = chord.parse::<KeyEvent>().ok()?;
        self.bindings.remove(&event)
    }

    /// Action bound to `event`.
    #[must_use]
    pub fn resolve(&self, event: KeyEvent) -> Option<Action> {
        self.bindings.get(&event.normalized()).copied()
    }

    /// All chords bound to `action`, formatted for menus and tooltips.
    #[must_use]
    pub fn chords_for(&self, action: Action) -> Vec<String> {
        let mut chords: Vec<String> = self
            .bindings
            .iter()
            .filter(|(_, bound)| **bound == action)
            .map(|(event, _)| event.to_string())
            .collect();
        chords.sort();
        chords
    }

    /// Number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Check if there are no bindings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::keyboard::{KeyCode, KeyModifiers};

    #[test]
    fn test_defaults_all_parse() {
        assert_eq!(Keymap::default().len(), DEFAULT_BINDINGS.len());
    }

    #[test]
    fn test_resolve_defaults() {
        let keymap = Keymap::default();
        assert_eq!(keymap.resolve(KeyEvent::ctrl('s')), Some(Action::Save));
        assert_eq!(
            keymap.resolve(KeyEvent::new(
                KeyCode::Char('S'),
                KeyModifiers::CTRL | KeyModifiers::SHIFT
            )),
            Some(Action::SaveAs)
        );
        assert_eq!(keymap.resolve(KeyEvent::ctrl('/')), Some(Action::ToggleComment));
        assert_eq!(keymap.resolve(KeyEvent::key(KeyCode::Tab)), Some(Action::Indent));
        assert_eq!(
            keymap.resolve(KeyEvent::key(KeyCode::BackTab)),
            Some(Action::Unindent)
        );
        assert_eq!(keymap.resolve(KeyEvent::ctrl('z')), None);
    }

    #[test]
    fn test_overrides() {
        let mut overrides = std::collections::BTreeMap::new();
        overrides.insert("ctrl+d".to_string(), Action::Duplicate);
        overrides.insert("ctrl+s".to_string(), Action::SaveAs);
        let keymap = Keymap::with_overrides(&overrides).unwrap();
        assert_eq!(keymap.resolve(KeyEvent::ctrl('d')), Some(Action::Duplicate));
        assert_eq!(keymap.resolve(KeyEvent::ctrl('s')), Some(Action::SaveAs));
        assert_eq!(
            keymap.chords_for(Action::Duplicate),
            vec!["ctrl+d".to_string(), "ctrl+shift+d".to_string()]
        );
    }

    #[test]
    fn test_bad_chord_is_config_error() {
        let mut keymap = Keymap::empty();
        let err = keymap.bind("ctrl+nope", Action::Save).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
        assert!(keymap.is_empty());
    }

    #[test]
    fn test_unbind() {
        let mut keymap = Keymap::default();
        assert_eq!(keymap.unbind("ctrl+n"), Some(Action::New));
        assert_eq!(keymap.resolve(KeyEvent::ctrl('n')), None);
    }

    #[test]
    fn test_from_config() {
        let config = EditorConfig::from_json_str(
            r#"{ "keybindings": { "ctrl+d": "duplicate", "ctrl+s": "save-as" } }"#,
        )
        .unwrap();
        let keymap = Keymap::from_config(&config).unwrap();
        assert_eq!(keymap.resolve(KeyEvent::ctrl('d')), Some(Action::Duplicate));
        assert_eq!(keymap.resolve(KeyEvent::ctrl('s')), Some(Action::SaveAs));
        assert_eq!(keymap.resolve(KeyEvent::ctrl('o')), Some(Action::Open));
    }
}

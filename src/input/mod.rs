//! Keyboard input: key events, chord parsing and the keymap.

mod keyboard;
mod keymap;

pub use keyboard::{KeyCode, KeyEvent, KeyModifiers, ParseChordError};
pub use keymap::{DEFAULT_BINDINGS, Keymap};

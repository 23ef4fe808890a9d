//! Editor configuration.
//!
//! Every field has a default, so a config file only needs the values it
//! changes:
//!
//! ```
//! use plainpad::EditorConfig;
//!
//! let config = EditorConfig::from_json_str(r#"{ "indent_width": 2 }"#).unwrap();
//! assert_eq!(config.indent_width, 2);
//! assert_eq!(config.comment_token, "//");
//! ```

use crate::command::Action;
use crate::error::{Error, Result};
use crate::input::Keymap;
use crate::text::{DEFAULT_COMMENT_TOKEN, DEFAULT_INDENT_WIDTH, LineOps};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

/// Widest indent accepted from configuration.
pub const MAX_INDENT_WIDTH: usize = 16;

/// Keys under which the session persists state in the local cache.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheKeys {
    pub content: String,
    pub filename: String,
    pub recent_emoji: String,
}

impl Default for CacheKeys {
    fn default() -> Self {
        Self {
            content: "editor_text".to_string(),
            filename: "current_filename".to_string(),
            recent_emoji: "emoji_recent".to_string(),
        }
    }
}

/// Settings for an editing session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Spaces inserted by Tab.
    pub indent_width: usize,
    /// Token used by comment toggling.
    pub comment_token: String,
    /// Name given to new documents.
    pub default_filename: String,
    /// Extensions that rename leaves alone.
    pub text_extensions: Vec<String>,
    /// Application name used in the window title.
    pub app_title: String,
    /// How many recent emojis to remember.
    pub recent_emoji_limit: usize,
    /// Period of the host's background flush to the local cache, in seconds.
    pub autosave_interval_secs: u64,
    pub cache_keys: CacheKeys,
    /// Extra or overriding key bindings, e.g. `"ctrl+shift+u": "duplicate"`.
    pub keybindings: BTreeMap<String, Action>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            indent_width: DEFAULT_INDENT_WIDTH,
            comment_token: DEFAULT_COMMENT_TOKEN.to_string(),
            default_filename: "untitled.txt".to_string(),
            text_extensions: vec![".txt".to_string()],
            app_title: "Notepad".to_string(),
            recent_emoji_limit: 32,
            autosave_interval_secs: 30,
            cache_keys: CacheKeys::default(),
            keybindings: BTreeMap::new(),
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            Error::InvalidConfig(format!("cannot read {}: {e}", path.display()))
        })?;
        let config = Self::from_json_str(&json)?;
        tracing::debug!(path = %path.display(), "loaded editor config");
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_INDENT_WIDTH).contains(&self.indent_width) {
            return Err(Error::InvalidConfig(format!(
                "indent_width must be between 1 and {MAX_INDENT_WIDTH}, got {}",
                self.indent_width
            )));
        }
        if self.comment_token.trim().is_empty() {
            return Err(Error::InvalidConfig("comment_token is empty".to_string()));
        }
        if self.default_filename.trim().is_empty() {
            return Err(Error::InvalidConfig("default_filename is empty".to_string()));
        }
        if self.text_extensions.iter().any(|ext| !ext.starts_with('.')) {
            return Err(Error::InvalidConfig(
                "text_extensions must start with '.'".to_string(),
            ));
        }
        Keymap::from_config(self)?;
        Ok(())
    }

    /// Line operations configured from this config.
    #[must_use]
    pub fn line_ops(&self) -> LineOps {
        LineOps::new(self.indent_width, &self.comment_token)
    }

    /// Background flush period.
    #[must_use]
    pub fn autosave_interval(&self) -> Duration {
        Duration::from_secs(self.autosave_interval_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = EditorConfig::default();
        config.validate().unwrap();
        assert_eq!(config.indent_width, 4);
        assert_eq!(config.autosave_interval(), Duration::from_secs(30));
    }

    #[test]
    fn test_partial_json() {
        let config = EditorConfig::from_json_str(
            r##"{ "comment_token": "#", "cache_keys": { "content": "doc" } }"##,
        )
        .unwrap();
        assert_eq!(config.comment_token, "#");
        assert_eq!(config.cache_keys.content, "doc");
        assert_eq!(config.cache_keys.filename, "current_filename");
    }

    #[test]
    fn test_keybindings_parse() {
        let config =
            EditorConfig::from_json_str(r#"{ "keybindings": { "ctrl+d": "duplicate" } }"#)
                .unwrap();
        assert_eq!(config.keybindings.get("ctrl+d"), Some(&Action::Duplicate));
    }

    #[test]
    fn test_invalid_values() {
        let err = EditorConfig::from_json_str(r#"{ "indent_width": 0 }"#).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));

        let err = EditorConfig::from_json_str(r#"{ "comment_token": " " }"#).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));

        let err = EditorConfig::from_json_str(r#"{ "text_extensions": ["txt"] }"#).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));

        let err =
            EditorConfig::from_json_str(r#"{ "keybindings": { "ctrl+nope": "save" } }"#)
                .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));

        let err = EditorConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plainpad.json");
        std::fs::write(&path, r#"{ "app_title": "Scratch" }"#).unwrap();
        let config = EditorConfig::from_path(&path).unwrap();
        assert_eq!(config.app_title, "Scratch");

        let missing = EditorConfig::from_path(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(missing, Error::InvalidConfig(_)));
    }
}

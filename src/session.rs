//! Editing session: one document and its collaborators.
//!
//! A [`Session`] owns the [`TextBuffer`] and [`DirtyState`] for a single
//! document, together with the persistence gateway and local cache it was
//! built with. UI event handlers hold a `&mut Session` and call one method
//! per event; each method returns a [`Snapshot`] to render. File operations
//! are `async` and report through [`PersistOutcome`] or an [`Error`].
//!
//! Every buffer mutation is mirrored into the local cache so an unexpected
//! exit loses nothing. Cache write failures are logged and otherwise ignored.

use crate::command::{Action, Command};
use crate::config::EditorConfig;
use crate::dirty::{DirtyState, normalize_filename};
use crate::emoji::RecentEmojis;
use crate::error::{Error, Result};
use crate::input::{KeyEvent, Keymap};
use crate::notify::Notification;
use crate::persist::{LocalCache, OpenOutcome, PersistenceGateway, SaveAsOutcome};
use crate::stats::Stats;
use crate::text::{LineOps, TextBuffer, search};

/// Everything the UI needs to re-render after an operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub content: String,
    pub selection_start: usize,
    pub selection_end: usize,
    pub char_count: usize,
    pub word_count: usize,
    pub line_count: usize,
    /// 1-based line of the selection start.
    pub line: usize,
    /// 1-based column of the selection start.
    pub column: usize,
    pub is_dirty: bool,
    /// File name with the dirty marker when there are unsaved changes.
    pub display_name: String,
}

impl Snapshot {
    /// Number of selected characters.
    #[must_use]
    pub fn selection_len(&self) -> usize {
        self.selection_end - self.selection_start
    }

    /// Status bar text, e.g. `Line 3, Column 7 | 12 characters selected`.
    #[must_use]
    pub fn status_line(&self) -> String {
        let mut status = format!("Line {}, Column {}", self.line, self.column);
        if self.selection_len() > 0 {
            status.push_str(&format!(" | {} characters selected", self.selection_len()));
        }
        status
    }
}

/// Successful result of a file operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PersistOutcome {
    /// Written through a native handle under this name.
    Saved(String),
    /// Written via the download fallback under this name.
    Downloaded(String),
    /// Document loaded; the buffer now holds it.
    Opened(String),
    /// The user dismissed the picker; nothing changed.
    Cancelled,
}

impl PersistOutcome {
    /// Toast for this outcome. Cancellation is silent.
    #[must_use]
    pub fn notification(&self) -> Option<Notification> {
        match self {
            Self::Saved(_) => Some(Notification::success("File saved")),
            Self::Downloaded(name) => Some(Notification::success(format!("Downloaded \"{name}\""))),
            Self::Opened(name) => Some(Notification::success(format!("Opened \"{name}\""))),
            Self::Cancelled => None,
        }
    }
}

/// Result of [`Session::dispatch`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    pub snapshot: Snapshot,
    pub notification: Option<Notification>,
}

/// A single editing session.
#[derive(Debug)]
pub struct Session<G, C> {
    config: EditorConfig,
    ops: LineOps,
    buffer: TextBuffer,
    dirty: DirtyState,
    gateway: G,
    cache: C,
    recent_emojis: RecentEmojis,
    keymap: Keymap,
}

impl<G: PersistenceGateway, C: LocalCache> Session<G, C> {
    /// Start with an empty, clean document.
    pub fn new(config: EditorConfig, gateway: G, cache: C) -> Self {
        let keymap = Keymap::from_config(&config).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "ignoring configured key bindings");
            Keymap::default()
        });
        let recent_emojis = RecentEmojis::load(
            &cache,
            &config.cache_keys.recent_emoji,
            config.recent_emoji_limit,
        );
        Self {
            ops: config.line_ops(),
            buffer: TextBuffer::new(),
            dirty: DirtyState::new(&config.default_filename),
            config,
            gateway,
            cache,
            recent_emojis,
            keymap,
        }
    }

    /// Start from whatever the cache holds from a previous session.
    ///
    /// Restored content counts as persisted, so the document opens clean.
    pub fn restore(config: EditorConfig, gateway: G, cache: C) -> Self {
        let mut session = Self::new(config, gateway, cache);
        let keys = &session.config.cache_keys;
        if let Some(text) = session.cache.get(&keys.content) {
            session.buffer.set_content(&text);
            session.dirty.mark_persisted(&text);
        }
        if let Some(name) = session.cache.get(&keys.filename) {
            session.dirty.set_base_name(&name);
        }
        tracing::info!(
            chars = session.buffer.len_chars(),
            file = session.dirty.base_name(),
            "restored session"
        );
        session
    }

    /// Session configuration.
    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The document buffer.
    #[must_use]
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// Current text.
    #[must_use]
    pub fn text(&self) -> String {
        self.buffer.text()
    }

    /// Saved-state tracker.
    #[must_use]
    pub fn dirty_state(&self) -> &DirtyState {
        &self.dirty
    }

    /// The persistence gateway.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Mutable access to the persistence gateway.
    pub fn gateway_mut(&mut self) -> &mut G {
        &mut self.gateway
    }

    /// The local cache.
    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Key bindings: the defaults plus the config's overrides.
    #[must_use]
    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    /// Action bound to a key press, if any.
    #[must_use]
    pub fn resolve_key(&self, event: KeyEvent) -> Option<Action> {
        self.keymap.resolve(event)
    }

    /// Recently inserted emojis, newest first.
    #[must_use]
    pub fn recent_emojis(&self) -> &[String] {
        self.recent_emojis.items()
    }

    /// Whether closing now would lose changes.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty.is_dirty(&self.buffer.text())
    }

    /// Window title for the current state.
    #[must_use]
    pub fn window_title(&self) -> String {
        self.dirty
            .window_title(&self.buffer.text(), &self.config.app_title)
    }

    /// Derived view state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let content = self.buffer.text();
        let stats = Stats::for_buffer(&self.buffer);
        let selection = self.buffer.selection();
        let line = self.buffer.line_of(selection.start);
        let is_dirty = self.dirty.is_dirty(&content);
        Snapshot {
            selection_start: selection.start,
            selection_end: selection.end,
            char_count: stats.chars,
            word_count: stats.words,
            line_count: stats.lines,
            line: line + 1,
            column: selection.start - self.buffer.line_start(line) + 1,
            is_dirty,
            display_name: crate::dirty::compute_display_name(self.dirty.base_name(), is_dirty),
            content,
        }
    }

    /// Write content and file name to the cache.
    ///
    /// Called after every edit; hosts also call it on a timer
    /// ([`EditorConfig::autosave_interval`]) and when the window hides.
    pub fn flush_to_cache(&mut self) {
        let keys = &self.config.cache_keys;
        let result = self
            .cache
            .set(&keys.content, &self.buffer.text())
            .and_then(|()| self.cache.set(&keys.filename, self.dirty.base_name()));
        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to write session to local cache");
        }
    }

    fn edited(&mut self) -> Snapshot {
        self.flush_to_cache();
        self.snapshot()
    }

    /// The host text field changed (typing, paste, native undo).
    pub fn set_content(&mut self, text: &str) -> Snapshot {
        self.buffer.set_content(text);
        self.edited()
    }

    /// The caret or selection moved.
    pub fn set_selection(&mut self, start: usize, end: usize) -> Snapshot {
        self.buffer.set_selection(start, end);
        self.snapshot()
    }

    /// Replace the selection with `text`.
    pub fn insert_text(&mut self, text: &str) -> Snapshot {
        self.buffer.replace_selection(text);
        self.edited()
    }

    /// Insert an emoji at the caret and remember it.
    pub fn insert_emoji(&mut self, emoji: &str) -> Snapshot {
        self.buffer.replace_selection(emoji);
        if let Err(e) = self.recent_emojis.record(emoji, &mut self.cache) {
            tracing::warn!(error = %e, "failed to store recent emojis");
        }
        self.edited()
    }

    /// Tab or Shift+Tab.
    pub fn tab(&mut self, shift: bool) -> Snapshot {
        let result = self.ops.tab(&self.buffer, shift);
        self.buffer.apply(result);
        self.edited()
    }

    /// Duplicate the current line.
    pub fn duplicate_line(&mut self) -> Snapshot {
        let result = self.ops.duplicate_line(&self.buffer);
        self.buffer.apply(result);
        self.edited()
    }

    /// Delete the current line.
    pub fn delete_line(&mut self) -> Snapshot {
        let result = self.ops.delete_line(&self.buffer);
        self.buffer.apply(result);
        self.edited()
    }

    /// Comment or uncomment the current line.
    pub fn toggle_comment(&mut self) -> Snapshot {
        let result = self.ops.toggle_comment(&self.buffer);
        self.buffer.apply(result);
        self.edited()
    }

    /// Select the whole document.
    pub fn select_all(&mut self) -> Snapshot {
        self.buffer.select_all();
        self.snapshot()
    }

    /// Select the first case-insensitive match of `needle`.
    ///
    /// An empty needle (a dismissed prompt) leaves everything as it is.
    pub fn find(&mut self, needle: &str) -> Result<Snapshot> {
        if needle.is_empty() {
            return Ok(self.snapshot());
        }
        let Some(m) = search::find(&self.buffer.text(), needle) else {
            return Err(Error::NotFound {
                needle: needle.to_string(),
            });
        };
        self.buffer.set_selection(m.offset, m.end());
        Ok(self.snapshot())
    }

    /// Replace every case-insensitive match of `needle`; returns the count too.
    pub fn replace_all(&mut self, needle: &str, replacement: &str) -> (Snapshot, usize) {
        let (text, count) = search::replace_all(&self.buffer.text(), needle, replacement);
        if count == 0 {
            return (self.snapshot(), 0);
        }
        self.buffer.set_content(&text);
        tracing::debug!(count, "replaced matches");
        (self.edited(), count)
    }

    /// Discard the document and start an empty one.
    ///
    /// The UI is responsible for confirming when there is content.
    pub fn new_document(&mut self) -> Snapshot {
        self.buffer = TextBuffer::new();
        self.dirty = DirtyState::new(&self.config.default_filename);
        self.gateway.forget_handle();
        let keys = &self.config.cache_keys;
        let result = self
            .cache
            .remove(&keys.content)
            .and_then(|()| self.cache.remove(&keys.filename));
        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to clear local cache");
        }
        tracing::info!("started new document");
        self.snapshot()
    }

    /// Rename the document. `.txt` is appended if needed.
    pub fn rename(&mut self, name: &str) -> Result<Snapshot> {
        let name = normalize_filename(name, &self.config.text_extensions)?;
        self.dirty.set_base_name(&name);
        Ok(self.edited())
    }

    /// Save through the retained handle, or ask where to save if there is none.
    pub async fn save(&mut self) -> Result<PersistOutcome> {
        if !self.gateway.has_handle() {
            return self.save_as().await;
        }
        let content = self.buffer.text();
        let name = self.dirty.base_name().to_string();
        self.gateway
            .save(&content, &name)
            .await
            .inspect_err(|e| tracing::error!(error = %e, file = %name, "save failed"))?;
        self.dirty.mark_persisted(&content);
        tracing::info!(file = %name, "saved");
        Ok(PersistOutcome::Saved(name))
    }

    /// Ask where to save and write there.
    pub async fn save_as(&mut self) -> Result<PersistOutcome> {
        let content = self.buffer.text();
        let suggested = self.dirty.base_name().to_string();
        let outcome = self
            .gateway
            .save_as(&content, &suggested)
            .await
            .inspect_err(|e| tracing::error!(error = %e, file = %suggested, "save as failed"))?;
        let outcome = match outcome {
            SaveAsOutcome::Saved(name) => {
                self.dirty.set_base_name(&name);
                self.dirty.mark_persisted(&content);
                self.flush_to_cache();
                PersistOutcome::Saved(name)
            }
            SaveAsOutcome::Downloaded(name) => {
                self.dirty.mark_persisted(&content);
                PersistOutcome::Downloaded(name)
            }
            SaveAsOutcome::Cancelled => PersistOutcome::Cancelled,
        };
        tracing::info!(?outcome, "save as finished");
        Ok(outcome)
    }

    /// Ask for a file and load it, replacing the document.
    pub async fn open(&mut self) -> Result<PersistOutcome> {
        let outcome = self
            .gateway
            .open()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "open failed"))?;
        let OpenOutcome::Opened(document) = outcome else {
            return Ok(PersistOutcome::Cancelled);
        };
        self.buffer.set_content(&document.content);
        self.buffer.set_cursor(0);
        self.dirty.set_base_name(&document.name);
        self.dirty.mark_persisted(&document.content);
        self.flush_to_cache();
        tracing::info!(file = %document.name, chars = self.buffer.len_chars(), "opened");
        Ok(PersistOutcome::Opened(document.name))
    }

    /// Run a command, turning its result into a snapshot and notification.
    pub async fn dispatch(&mut self, command: Command) -> Response {
        tracing::debug!(?command, "dispatch");
        let result: Result<(Snapshot, Option<Notification>)> = match command {
            Command::Save => self.save().await.map(|o| self.with_outcome(&o)),
            Command::SaveAs => self.save_as().await.map(|o| self.with_outcome(&o)),
            Command::Open => self.open().await.map(|o| self.with_outcome(&o)),
            Command::New => Ok((
                self.new_document(),
                Some(Notification::info("New file created")),
            )),
            Command::Rename(name) => self.rename(&name).map(|snapshot| {
                let message = format!("Renamed to {}", self.dirty.base_name());
                (snapshot, Some(Notification::success(message)))
            }),
            Command::Find(needle) => self.find(&needle).map(|s| (s, None)),
            Command::Replace {
                needle,
                replacement,
            } => {
                let (snapshot, count) = self.replace_all(&needle, &replacement);
                if needle.is_empty() {
                    Ok((snapshot, None))
                } else if count == 0 {
                    Err(Error::NotFound { needle })
                } else {
                    let noun = if count == 1 { "occurrence" } else { "occurrences" };
                    let message = format!("Replaced {count} {noun}");
                    Ok((snapshot, Some(Notification::success(message))))
                }
            }
            Command::SelectAll => Ok((self.select_all(), None)),
            Command::DuplicateLine => Ok((self.duplicate_line(), None)),
            Command::DeleteLine => Ok((self.delete_line(), None)),
            Command::ToggleComment => Ok((self.toggle_comment(), None)),
            Command::Tab { shift } => Ok((self.tab(shift), None)),
            Command::InsertText(text) => Ok((self.insert_text(&text), None)),
            Command::InsertEmoji(emoji) => Ok((self.insert_emoji(&emoji), None)),
            Command::SetContent(text) => Ok((self.set_content(&text), None)),
            Command::SetSelection { start, end } => Ok((self.set_selection(start, end), None)),
        };

        match result {
            Ok((snapshot, notification)) => Response {
                snapshot,
                notification,
            },
            Err(e) => Response {
                snapshot: self.snapshot(),
                notification: Notification::for_error(&e),
            },
        }
    }

    fn with_outcome(&self, outcome: &PersistOutcome) -> (Snapshot, Option<Notification>) {
        (self.snapshot(), outcome.notification())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::{Document, MemoryCache};

    /// Gateway that serves a fixed document and records writes.
    #[derive(Default)]
    struct StubGateway {
        handle: bool,
        written: Vec<(String, String)>,
        fail: bool,
    }

    impl PersistenceGateway for StubGateway {
        async fn open(&mut self) -> Result<OpenOutcome> {
            self.handle = true;
            Ok(OpenOutcome::Opened(Document {
                content: "from disk".to_string(),
                name: "disk.txt".to_string(),
            }))
        }

        async fn save(&mut self, content: &str, filename: &str) -> Result<()> {
            if self.fail {
                return Err(Error::persistence("save", "disk full"));
            }
            self.written.push((filename.to_string(), content.to_string()));
            Ok(())
        }

        async fn save_as(&mut self, content: &str, suggested: &str) -> Result<SaveAsOutcome> {
            self.handle = true;
            self.written.push((suggested.to_string(), content.to_string()));
            Ok(SaveAsOutcome::Saved(suggested.to_string()))
        }

        fn has_handle(&self) -> bool {
            self.handle
        }

        fn forget_handle(&mut self) {
            self.handle = false;
        }
    }

    fn session() -> Session<StubGateway, MemoryCache> {
        Session::new(
            EditorConfig::default(),
            StubGateway::default(),
            MemoryCache::new(),
        )
    }

    #[test]
    fn test_snapshot_of_empty_session() {
        let s = session().snapshot();
        assert_eq!(s.content, "");
        assert_eq!((s.char_count, s.word_count, s.line_count), (0, 0, 1));
        assert_eq!((s.line, s.column), (1, 1));
        assert!(!s.is_dirty);
        assert_eq!(s.display_name, "untitled.txt");
        assert_eq!(s.status_line(), "Line 1, Column 1");
    }

    #[test]
    fn test_edits_mark_dirty_and_autosave() {
        let mut session = session();
        let s = session.set_content("hello world");
        assert!(s.is_dirty);
        assert_eq!(s.display_name, "untitled.txt*");
        assert_eq!(
            session.cache().get("editor_text").as_deref(),
            Some("hello world")
        );
        assert_eq!(session.window_title(), "● untitled.txt - Notepad");
    }

    #[test]
    fn test_selection_status() {
        let mut session = session();
        session.set_content("abc\ndef");
        let s = session.set_selection(5, 7);
        assert_eq!((s.line, s.column), (2, 2));
        assert_eq!(s.status_line(), "Line 2, Column 2 | 2 characters selected");
    }

    #[test]
    fn test_find_selects_match() {
        let mut session = session();
        session.set_content("Hello World");
        let s = session.find("world").unwrap();
        assert_eq!((s.selection_start, s.selection_end), (6, 11));
        let err = session.find("absent").unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_empty_needle_is_silent() {
        let mut session = session();
        session.set_content("keep me");
        session.set_selection(2, 4);

        let s = session.find("").unwrap();
        assert_eq!((s.selection_start, s.selection_end), (2, 4));

        let response = session.dispatch(Command::Find(String::new())).await;
        assert_eq!(response.notification, None);

        let response = session
            .dispatch(Command::Replace {
                needle: String::new(),
                replacement: "x".to_string(),
            })
            .await;
        assert_eq!(response.notification, None);
        assert_eq!(response.snapshot.content, "keep me");
    }

    #[test]
    fn test_configured_keybindings_resolve() {
        let mut config = EditorConfig::default();
        config
            .keybindings
            .insert("ctrl+d".to_string(), Action::Duplicate);
        let session = Session::new(config, StubGateway::default(), MemoryCache::new());
        assert_eq!(
            session.resolve_key(KeyEvent::ctrl('d')),
            Some(Action::Duplicate)
        );
        assert_eq!(session.keymap().resolve(KeyEvent::ctrl('s')), Some(Action::Save));
    }

    #[test]
    fn test_bad_keybinding_falls_back_to_defaults() {
        let mut config = EditorConfig::default();
        config
            .keybindings
            .insert("ctrl+nope".to_string(), Action::Duplicate);
        let session = Session::new(config, StubGateway::default(), MemoryCache::new());
        assert_eq!(session.resolve_key(KeyEvent::ctrl('s')), Some(Action::Save));
    }

    #[test]
    fn test_rename_normalizes() {
        let mut session = session();
        let s = session.rename("report").unwrap();
        assert_eq!(s.display_name, "report.txt");
        assert!(session.rename("  ").is_err());
        assert_eq!(
            session.cache().get("current_filename").as_deref(),
            Some("report.txt")
        );
    }

    #[tokio::test]
    async fn test_save_without_handle_goes_through_save_as() {
        let mut session = session();
        session.set_content("draft");
        let outcome = session.save().await.unwrap();
        assert_eq!(outcome, PersistOutcome::Saved("untitled.txt".to_string()));
        assert!(!session.has_unsaved_changes());

        session.insert_text("!");
        session.save().await.unwrap();
        assert_eq!(session.gateway().written.len(), 2);
        assert_eq!(session.gateway().written[1].1, "!draft");
    }

    #[tokio::test]
    async fn test_failed_save_keeps_buffer_dirty() {
        let mut session = session();
        session.gateway_mut().handle = true;
        session.gateway_mut().fail = true;
        session.set_content("precious");
        let response = session.dispatch(Command::Save).await;
        assert_eq!(response.snapshot.content, "precious");
        assert!(response.snapshot.is_dirty);
        assert!(response.notification.unwrap().is_error());
    }

    #[tokio::test]
    async fn test_open_replaces_document() {
        let mut session = session();
        session.set_content("old");
        let response = session.dispatch(Command::Open).await;
        assert_eq!(response.snapshot.content, "from disk");
        assert_eq!(response.snapshot.display_name, "disk.txt");
        assert!(!response.snapshot.is_dirty);
        assert_eq!(
            response.notification,
            Some(Notification::success("Opened \"disk.txt\""))
        );
    }

    #[tokio::test]
    async fn test_new_document_resets_everything() {
        let mut session = session();
        session.open().await.unwrap();
        let response = session.dispatch(Command::New).await;
        assert_eq!(response.snapshot.content, "");
        assert_eq!(response.snapshot.display_name, "untitled.txt");
        assert!(!session.gateway().has_handle());
        assert_eq!(session.cache().get("editor_text"), None);
    }
}

//! `plainpad` - editing engine for a plain-text notepad
//!
//! Line-oriented editing operations, search, document statistics and
//! dirty-state tracking over a rope buffer, plus the session that wires them
//! to pluggable file storage and a local cache.

// Crate-level lint configuration
#![allow(clippy::module_name_repetitions)] // Allow text::TextBuffer etc
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::format_push_string)] // format! with push_str is fine
#![allow(clippy::future_not_send)] // Session futures run on a local event loop
#![allow(clippy::items_after_statements)] // Common pattern in tests
#![allow(clippy::semicolon_if_nothing_returned)] // Style preference

pub mod command;
pub mod config;
pub mod dirty;
pub mod emoji;
pub mod error;
pub mod input;
pub mod notify;
pub mod persist;
pub mod session;
pub mod stats;
pub mod text;

// Re-export core types at crate root
pub use command::{Action, Command};
pub use config::{CacheKeys, EditorConfig};
pub use dirty::{DirtyState, compute_dirty, compute_display_name, normalize_filename};
pub use error::{Error, ErrorKind, Result};
pub use notify::{Level, Notification};
pub use session::{PersistOutcome, Response, Session, Snapshot};
pub use stats::Stats;

// Re-export input types
pub use input::{KeyCode, KeyEvent, KeyModifiers, Keymap};

// Re-export persistence types
pub use persist::{
    Document, FilePicker, FsGateway, JsonFileCache, LocalCache, MemoryCache, OpenOutcome,
    PersistenceGateway, SaveAsOutcome,
};

// Re-export text types
pub use text::{EditResult, LineOps, Selection, TextBuffer};

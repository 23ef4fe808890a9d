//! Persistence collaborators.
//!
//! The session never touches storage directly. Files go through a
//! [`PersistenceGateway`]; session state that should survive a restart goes
//! through a [`LocalCache`]. Both are traits so hosts can plug in their own
//! storage; [`FsGateway`], [`MemoryCache`] and [`JsonFileCache`] are the
//! bundled implementations.
//!
//! Gateways convert every storage failure into
//! [`Error::PersistenceFailed`](crate::Error::PersistenceFailed). A dismissed
//! picker is an outcome ([`OpenOutcome::Cancelled`],
//! [`SaveAsOutcome::Cancelled`]), not an error.

// Gateways are driven from a single-threaded event loop, so the returned
// futures carry no Send bound.
#![allow(async_fn_in_trait)]

mod cache;
mod fs;

pub use cache::{JsonFileCache, LocalCache, MemoryCache};
pub use fs::{FilePicker, FsGateway};

use crate::error::Result;

/// A document read from storage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    /// File contents.
    pub content: String,
    /// File name without directories.
    pub name: String,
}

/// Result of asking the user for a file to open.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OpenOutcome {
    Opened(Document),
    Cancelled,
}

/// Result of asking the user where to save.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SaveAsOutcome {
    /// Written through a native handle that later saves reuse.
    Saved(String),
    /// No native picker; written via the download fallback under this name.
    Downloaded(String),
    Cancelled,
}

/// Storage for whole documents.
pub trait PersistenceGateway {
    /// Let the user pick a document and read it.
    async fn open(&mut self) -> Result<OpenOutcome>;

    /// Write `content` through the handle retained by the last open/save-as.
    async fn save(&mut self, content: &str, filename: &str) -> Result<()>;

    /// Let the user choose a destination and write `content` there.
    async fn save_as(&mut self, content: &str, suggested_name: &str) -> Result<SaveAsOutcome>;

    /// Whether a writable handle from an earlier open/save-as is retained.
    fn has_handle(&self) -> bool;

    /// Drop the retained handle (new document).
    fn forget_handle(&mut self);
}

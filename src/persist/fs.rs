//! Filesystem-backed gateway.
//!
//! A host supplies a [`FilePicker`]. When the picker has native dialogs, the
//! chosen path is retained as a writable handle so later saves go straight
//! back to it. Without native dialogs, opening falls back to a read-only
//! file input and saving falls back to a "download" into a fixed directory.

use super::{Document, OpenOutcome, PersistenceGateway, SaveAsOutcome};
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Host-provided file dialogs.
///
/// `Ok(None)` means the user dismissed the dialog. Hosts whose dialogs
/// report dismissal as a failure may return `Err(Error::Cancelled)` instead;
/// the gateway treats both the same.
pub trait FilePicker {
    /// Native open dialog; `Err(Error::Unavailable)` if the host has none.
    async fn pick_open(&mut self) -> Result<Option<PathBuf>>;

    /// Native save dialog; `Err(Error::Unavailable)` if the host has none.
    async fn pick_save(&mut self, suggested_name: &str) -> Result<Option<PathBuf>>;

    /// Plain file input. The result is read once and not kept as a handle.
    async fn pick_input(&mut self) -> Result<Option<PathBuf>>;
}

/// [`PersistenceGateway`] over the local filesystem.
#[derive(Debug)]
pub struct FsGateway<P> {
    picker: P,
    download_dir: PathBuf,
    handle: Option<PathBuf>,
}

impl<P: FilePicker> FsGateway<P> {
    /// Gateway that downloads into `download_dir` when native saving is unavailable.
    pub fn new(picker: P, download_dir: impl Into<PathBuf>) -> Self {
        Self {
            picker,
            download_dir: download_dir.into(),
            handle: None,
        }
    }

    /// Path of the retained handle.
    #[must_use]
    pub fn handle(&self) -> Option<&Path> {
        self.handle.as_deref()
    }

    /// Directory used by the download fallback.
    #[must_use]
    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    /// The host picker.
    pub fn picker_mut(&mut self) -> &mut P {
        &mut self.picker
    }

    async fn read(path: &Path) -> Result<Document> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::persistence("open", e))?;
        Ok(Document {
            content,
            name: file_name(path),
        })
    }

    async fn write(path: &Path, content: &str) -> Result<()> {
        tokio::fs::write(path, content)
            .await
            .map_err(|e| Error::persistence("save", e))
    }

    /// Browser-style download: never overwrite, append ` (n)` instead.
    async fn download(&self, content: &str, name: &str) -> Result<String> {
        let (stem, ext) = match name.rfind('.') {
            Some(dot) if dot > 0 => name.split_at(dot),
            _ => (name, ""),
        };
        let mut candidate = name.to_string();
        let mut n = 1;
        while tokio::fs::try_exists(self.download_dir.join(&candidate))
            .await
            .map_err(|e| Error::persistence("save", e))?
        {
            candidate = format!("{stem} ({n}){ext}");
            n += 1;
        }
        Self::write(&self.download_dir.join(&candidate), content).await?;
        Ok(candidate)
    }
}

impl<P: FilePicker> PersistenceGateway for FsGateway<P> {
    async fn open(&mut self) -> Result<OpenOutcome> {
        let (picked, native) = match self.picker.pick_open().await {
            Err(Error::Unavailable(what)) => {
                tracing::debug!(what, "falling back to file input");
                (dismissed_as_none(self.picker.pick_input().await)?, false)
            }
            other => (dismissed_as_none(other)?, true),
        };
        let Some(path) = picked else {
            return Ok(OpenOutcome::Cancelled);
        };

        let document = Self::read(&path).await?;
        self.handle = native.then_some(path);
        Ok(OpenOutcome::Opened(document))
    }

    async fn save(&mut self, content: &str, _filename: &str) -> Result<()> {
        let Some(path) = self.handle.as_deref() else {
            return Err(Error::Unavailable("file handle"));
        };
        Self::write(path, content).await
    }

    async fn save_as(&mut self, content: &str, suggested_name: &str) -> Result<SaveAsOutcome> {
        match self.picker.pick_save(suggested_name).await {
            Ok(Some(path)) => {
                Self::write(&path, content).await?;
                let name = file_name(&path);
                self.handle = Some(path);
                Ok(SaveAsOutcome::Saved(name))
            }
            Ok(None) | Err(Error::Cancelled) => Ok(SaveAsOutcome::Cancelled),
            Err(Error::Unavailable(what)) => {
                tracing::debug!(what, "falling back to download");
                let name = self.download(content, suggested_name).await?;
                Ok(SaveAsOutcome::Downloaded(name))
            }
            Err(e) => Err(e),
        }
    }

    fn has_handle(&self) -> bool {
        self.handle.is_some()
    }

    fn forget_handle(&mut self) {
        self.handle = None;
    }
}

fn dismissed_as_none(picked: Result<Option<PathBuf>>) -> Result<Option<PathBuf>> {
    match picked {
        Err(Error::Cancelled) => Ok(None),
        other => other,
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

#![allow(clippy::nursery)] // Test infra prioritizes clarity over pedantry
#![allow(clippy::pedantic)] // Test infra prioritizes clarity over pedantry
#![allow(dead_code)] // Not every test binary uses every helper

use plainpad::persist::{OpenOutcome, SaveAsOutcome};
use plainpad::{
    EditorConfig, Error, FilePicker, FsGateway, MemoryCache, PersistenceGateway, Result, Session,
};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

/// Route engine logs to the test harness. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Picker that replays queued answers. An empty queue means the user
/// dismissed the dialog.
#[derive(Debug, Default)]
pub struct ScriptedPicker {
    /// Native dialogs exist; otherwise pick_open/pick_save report Unavailable.
    pub native: bool,
    pub opens: VecDeque<PathBuf>,
    pub saves: VecDeque<PathBuf>,
    pub inputs: VecDeque<PathBuf>,
    /// Names suggested to the save dialog, in order.
    pub suggested: Vec<String>,
}

impl ScriptedPicker {
    pub fn native() -> Self {
        Self {
            native: true,
            ..Self::default()
        }
    }

    pub fn without_native_dialogs() -> Self {
        Self::default()
    }
}

impl FilePicker for ScriptedPicker {
    async fn pick_open(&mut self) -> Result<Option<PathBuf>> {
        if !self.native {
            return Err(Error::Unavailable("native file picker"));
        }
        Ok(self.opens.pop_front())
    }

    async fn pick_save(&mut self, suggested_name: &str) -> Result<Option<PathBuf>> {
        if !self.native {
            return Err(Error::Unavailable("native file picker"));
        }
        self.suggested.push(suggested_name.to_string());
        Ok(self.saves.pop_front())
    }

    async fn pick_input(&mut self) -> Result<Option<PathBuf>> {
        Ok(self.inputs.pop_front())
    }
}

pub type FsSession = Session<FsGateway<ScriptedPicker>, MemoryCache>;

/// Session over the real filesystem, downloading into `download_dir`.
pub fn fs_session(picker: ScriptedPicker, download_dir: &Path) -> FsSession {
    init_tracing();
    Session::new(
        EditorConfig::default(),
        FsGateway::new(picker, download_dir),
        MemoryCache::new(),
    )
}

/// Gateway whose storage always fails.
#[derive(Debug, Default)]
pub struct FailingGateway;

impl PersistenceGateway for FailingGateway {
    async fn open(&mut self) -> Result<OpenOutcome> {
        Err(Error::persistence("open", "permission denied"))
    }

    async fn save(&mut self, _content: &str, _filename: &str) -> Result<()> {
        Err(Error::persistence("save", "permission denied"))
    }

    async fn save_as(&mut self, _content: &str, _suggested_name: &str) -> Result<SaveAsOutcome> {
        Err(Error::persistence("save", "permission denied"))
    }

    fn has_handle(&self) -> bool {
        true
    }

    fn forget_handle(&mut self) {}
}

// ── Builders ──────────────────────────────────────────────────────────────────
//
// The public face of the crate.  A builder collects options, then one
// terminal call marshals them into a request, makes a single blocking native
// call through a `Backend`, and decodes the answer.  Nothing is kept between
// calls.
//
// Each terminal operation has a `*_with` twin taking an explicit backend; the
// plain versions use the Win32 backend and exist on Windows only.

use std::path::PathBuf;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::backend::{self, Backend, WindowHandle};
use crate::error::Result;
use crate::request::{BrowseRequest, FileMode, FileRequest, MessageKind, MessageRequest};

#[cfg(windows)]
use crate::platform::win32::backend as native;

// ── Options ───────────────────────────────────────────────────────────────────

/// One entry in a file dialog's type selector, e.g.
/// `FileFilter::new("Music File", ["mp3", "ogg"])`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFilter {
    /// Text shown in the selector.
    pub desc: String,
    /// Extensions without the leading dot.
    #[serde(default)]
    pub extensions: Vec<String>,
}

impl FileFilter {
    pub fn new<I, S>(desc: impl Into<String>, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            desc: desc.into(),
            extensions: extensions.into_iter().map(Into::into).collect(),
        }
    }
}

/// Which window a dialog is attached to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Owner {
    /// Whatever top-level window has focus (`GetForegroundWindow`), which may
    /// belong to another thread.  Null if nothing has focus.
    #[default]
    Foreground,
    /// No owner; the dialog is a free-standing top-level window.
    None,
    /// An explicit window.
    Window(WindowHandle),
}

impl Owner {
    pub(crate) fn resolve<B: Backend + ?Sized>(self, backend: &B) -> WindowHandle {
        match self {
            Self::Foreground => {
                let hwnd = backend.foreground_window();
                if hwnd.is_null() {
                    debug!("no foreground window; dialog will be unowned");
                }
                hwnd
            }
            Self::None => WindowHandle::NULL,
            Self::Window(hwnd) => hwnd,
        }
    }
}

// ── Entry points ──────────────────────────────────────────────────────────────

/// Start a message box showing `msg`.
pub fn message(msg: impl Into<String>) -> MsgBuilder {
    MsgBuilder {
        msg: msg.into(),
        title: String::new(),
        owner: Owner::None,
    }
}

/// Start an open/save file dialog.
pub fn file() -> FileBuilder {
    FileBuilder::default()
}

/// Start a folder picker.
pub fn directory() -> DirectoryBuilder {
    DirectoryBuilder::default()
}

// ── Message box ───────────────────────────────────────────────────────────────

/// Builder for a message box.  See [`message`].
#[derive(Debug, Clone)]
pub struct MsgBuilder {
    msg: String,
    title: String,
    owner: Owner,
}

impl MsgBuilder {
    /// Caption.  Empty falls back to "Confirm?", "Information" or "Error".
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Owner window.  Defaults to [`Owner::None`].
    pub fn owner(mut self, owner: Owner) -> Self {
        self.owner = owner;
        self
    }

    fn request<B: Backend + ?Sized>(&self, backend: &B, kind: MessageKind) -> MessageRequest {
        MessageRequest::new(self.owner.resolve(backend), kind, &self.msg, &self.title)
    }

    /// Ask a Yes/No question; `true` iff the user chose Yes.
    pub fn yes_no_with<B: Backend + ?Sized>(&self, backend: &B) -> bool {
        backend::confirm(backend, &self.request(backend, MessageKind::Confirm))
    }

    /// Show an informational message and wait for OK.
    pub fn info_with<B: Backend + ?Sized>(&self, backend: &B) {
        let _ = backend::show_message(backend, &self.request(backend, MessageKind::Info));
    }

    /// Show an error message and wait for OK.
    pub fn error_with<B: Backend + ?Sized>(&self, backend: &B) {
        let _ = backend::show_message(backend, &self.request(backend, MessageKind::Error));
    }

    #[cfg(windows)]
    pub fn yes_no(&self) -> bool {
        self.yes_no_with(native())
    }

    #[cfg(windows)]
    pub fn info(&self) {
        self.info_with(native())
    }

    #[cfg(windows)]
    pub fn error(&self) {
        self.error_with(native())
    }
}

// ── File dialog ───────────────────────────────────────────────────────────────

/// Builder for the open and save dialogs.  See [`file`].
#[derive(Debug, Clone, Default)]
pub struct FileBuilder {
    title: String,
    start_file: String,
    start_dir: Option<PathBuf>,
    filters: Vec<FileFilter>,
    owner: Owner,
}

impl FileBuilder {
    /// Caption.  Empty keeps the system default ("Open" / "Save As").
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Prefill the file name box.
    pub fn set_start_file(mut self, name: impl Into<String>) -> Self {
        self.start_file = name.into();
        self
    }

    /// Directory the dialog opens in.
    pub fn set_start_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.start_dir = Some(dir.into());
        self
    }

    /// Append a type filter.  Extensions are given without the dot.
    pub fn filter<I, S>(mut self, desc: impl Into<String>, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters.push(FileFilter::new(desc, extensions));
        self
    }

    /// Append several filters, e.g. ones loaded from a config file.
    pub fn filters(mut self, filters: impl IntoIterator<Item = FileFilter>) -> Self {
        self.filters.extend(filters);
        self
    }

    /// Owner window.  Defaults to [`Owner::Foreground`].
    pub fn owner(mut self, owner: Owner) -> Self {
        self.owner = owner;
        self
    }

    fn run<B: Backend + ?Sized>(&self, backend: &B, mode: FileMode) -> Result<PathBuf> {
        let req = FileRequest::new(
            mode,
            self.owner.resolve(backend),
            &self.start_file,
            self.start_dir.as_deref(),
            &self.title,
            &self.filters,
        )?;
        backend::run_file_dialog(backend, req)
    }

    /// Pick an existing file to open.
    pub fn load_with<B: Backend + ?Sized>(&self, backend: &B) -> Result<PathBuf> {
        self.run(backend, FileMode::Open)
    }

    /// Pick a file name to save to; the dialog confirms overwrites.
    pub fn save_with<B: Backend + ?Sized>(&self, backend: &B) -> Result<PathBuf> {
        self.run(backend, FileMode::Save)
    }

    #[cfg(windows)]
    pub fn load(&self) -> Result<PathBuf> {
        self.load_with(native())
    }

    #[cfg(windows)]
    pub fn save(&self) -> Result<PathBuf> {
        self.save_with(native())
    }
}

// ── Directory dialog ──────────────────────────────────────────────────────────

/// Builder for the folder picker.  See [`directory`].
#[derive(Debug, Clone, Default)]
pub struct DirectoryBuilder {
    title: String,
    start_dir: Option<PathBuf>,
    owner: Owner,
}

impl DirectoryBuilder {
    /// Text shown above the folder tree.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Folder selected when the dialog opens.
    pub fn set_start_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.start_dir = Some(dir.into());
        self
    }

    /// Owner window.  Defaults to [`Owner::Foreground`].
    pub fn owner(mut self, owner: Owner) -> Self {
        self.owner = owner;
        self
    }

    /// Let the user pick a filesystem directory.
    pub fn browse_with<B: Backend + ?Sized>(&self, backend: &B) -> Result<PathBuf> {
        let req = BrowseRequest::new(
            self.owner.resolve(backend),
            self.start_dir.as_deref(),
            &self.title,
        )?;
        backend::run_browse(backend, &req)
    }

    #[cfg(windows)]
    pub fn browse(&self) -> Result<PathBuf> {
        self.browse_with(native())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

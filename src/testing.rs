// ── Test doubles ──────────────────────────────────────────────────────────────
//
// A `Backend` that records every request and answers with canned native
// responses, plus a `MessageSink` that records sent messages.

use std::cell::{Cell, RefCell};
use std::path::PathBuf;

use crate::backend::{Backend, MessageSink, WindowHandle};
use crate::request::{BrowseRequest, FileRequest, MessageRequest};

/// What the simulated file dialog does.
#[derive(Debug, Clone, Default)]
enum FileOutcome {
    /// Return FALSE (cancel or failure; see `extended_error`).
    #[default]
    Fail,
    /// Return TRUE, leaving the buffer as the caller filled it.
    Accept,
    /// Write this path into the buffer, then return TRUE.
    Write(String),
}

pub(crate) struct MockBackend {
    foreground: WindowHandle,
    button: i32,
    file: FileOutcome,
    ext_error: u32,
    folder: Option<PathBuf>,

    messages: RefCell<Vec<MessageRequest>>,
    files: RefCell<Vec<FileRequest>>,
    browses: RefCell<Vec<BrowseRequest>>,
    ext_queries: Cell<usize>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self {
            foreground: WindowHandle(0x5150),
            button: 1, // IDOK
            file: FileOutcome::Fail,
            ext_error: 0,
            folder: None,
            messages: RefCell::default(),
            files: RefCell::default(),
            browses: RefCell::default(),
            ext_queries: Cell::new(0),
        }
    }
}

impl MockBackend {
    pub(crate) fn with_foreground(mut self, hwnd: WindowHandle) -> Self {
        self.foreground = hwnd;
        self
    }

    pub(crate) fn with_button(mut self, id: i32) -> Self {
        self.button = id;
        self
    }

    /// `Some(path)`: the user picked `path`.  `None`: the call fails.
    pub(crate) fn with_file_result(mut self, path: Option<&str>) -> Self {
        self.file = match path {
            Some(p) => FileOutcome::Write(p.to_owned()),
            None => FileOutcome::Fail,
        };
        self
    }

    /// The user accepted the prefilled name unchanged.
    pub(crate) fn with_file_success(mut self) -> Self {
        self.file = FileOutcome::Accept;
        self
    }

    pub(crate) fn with_extended_error(mut self, code: u32) -> Self {
        self.ext_error = code;
        self
    }

    pub(crate) fn with_folder(mut self, path: Option<&str>) -> Self {
        self.folder = path.map(PathBuf::from);
        self
    }

    pub(crate) fn messages(&self) -> Vec<MessageRequest> {
        self.messages.borrow().clone()
    }

    /// File requests as the backend saw them, before any simulated edit.
    pub(crate) fn file_requests(&self) -> Vec<FileRequest> {
        self.files.borrow().clone()
    }

    pub(crate) fn browse_requests(&self) -> Vec<BrowseRequest> {
        self.browses.borrow().clone()
    }

    pub(crate) fn extended_error_queries(&self) -> usize {
        self.ext_queries.get()
    }
}

impl Backend for MockBackend {
    fn foreground_window(&self) -> WindowHandle {
        self.foreground
    }

    fn message_box(&self, req: &MessageRequest) -> i32 {
        self.messages.borrow_mut().push(req.clone());
        self.button
    }

    fn file_dialog(&self, req: &mut FileRequest) -> bool {
        self.files.borrow_mut().push(req.clone());
        match &self.file {
            FileOutcome::Fail => false,
            FileOutcome::Accept => true,
            FileOutcome::Write(path) => {
                let wide: Vec<u16> = path.encode_utf16().chain(std::iter::once(0)).collect();
                req.file[..wide.len()].copy_from_slice(&wide);
                true
            }
        }
    }

    fn extended_error(&self) -> u32 {
        self.ext_queries.set(self.ext_queries.get() + 1);
        self.ext_error
    }

    fn browse_for_folder(&self, req: &BrowseRequest) -> Option<PathBuf> {
        self.browses.borrow_mut().push(req.clone());
        self.folder.clone()
    }
}

/// Records every `send_message` call.
#[derive(Default)]
pub(crate) struct RecordingSink {
    pub(crate) sent: Vec<(WindowHandle, u32, usize, isize)>,
}

impl MessageSink for RecordingSink {
    fn send_message(&mut self, hwnd: WindowHandle, msg: u32, wparam: usize, lparam: isize) -> isize {
        self.sent.push((hwnd, msg, wparam, lparam));
        0
    }
}

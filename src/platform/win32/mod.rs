// ── Win32 backend ─────────────────────────────────────────────────────────────
//
// This is the only module in the crate where `unsafe` code is permitted.
// Every `unsafe` block MUST carry a `// SAFETY:` comment that states:
//   • which invariant makes the operation sound, and
//   • what the caller is responsible for maintaining.
//
// The system libraries (user32, comdlg32, shell32) are bound through import
// libraries, so the loader resolves them once per process; there is no
// handle to initialise or tear down here.

#![allow(unsafe_code)]

// ── Sub-modules ───────────────────────────────────────────────────────────────

pub(crate) mod dialogs; // common dialogs, folder browse, message box
pub(crate) mod window; // owner lookup, HWND conversion

use std::path::PathBuf;

use crate::backend::{Backend, WindowHandle};
use crate::request::{BrowseRequest, FileRequest, MessageRequest};

/// The native Win32 dialogs.
#[derive(Debug, Clone, Copy, Default)]
pub struct Win32Backend;

static BACKEND: Win32Backend = Win32Backend;

/// The process-wide Win32 backend used by the builders' plain operations.
pub fn backend() -> &'static Win32Backend {
    &BACKEND
}

impl Backend for Win32Backend {
    fn foreground_window(&self) -> WindowHandle {
        window::foreground_window()
    }

    fn message_box(&self, req: &MessageRequest) -> i32 {
        dialogs::message_box(req)
    }

    fn file_dialog(&self, req: &mut FileRequest) -> bool {
        dialogs::file_dialog(req)
    }

    fn extended_error(&self) -> u32 {
        dialogs::extended_error()
    }

    fn browse_for_folder(&self, req: &BrowseRequest) -> Option<PathBuf> {
        dialogs::browse_for_folder(req)
    }
}

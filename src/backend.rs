// ── Native seam ───────────────────────────────────────────────────────────────
//
// `Backend` is the only way the rest of the crate talks to the OS.  Its
// methods map one-to-one onto the Win32 calls the dialogs need; everything
// around them (marshaling, result decoding, error translation) lives here in
// safe, platform-neutral code.  The Win32 implementation is in
// `platform::win32`; tests substitute a recording mock.

use std::path::PathBuf;

use log::{debug, error};
use serde::{Deserialize, Serialize};

use crate::error::{DialogError, Result};
use crate::request::{
    BrowseRequest, FileRequest, MessageRequest, BFFM_INITIALIZED, BFFM_SETSELECTIONW, IDYES,
};

// ── Window handle ─────────────────────────────────────────────────────────────

/// An opaque top-level window handle (`HWND`), or null.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowHandle(pub isize);

impl WindowHandle {
    /// The null handle: no owner.
    pub const NULL: Self = Self(0);

    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

// ── Trait ─────────────────────────────────────────────────────────────────────

/// The native dialog calls.  Every method blocks until the OS returns.
pub trait Backend {
    /// `GetForegroundWindow`; null when no window has focus.
    fn foreground_window(&self) -> WindowHandle;

    /// `MessageBoxW`; returns the button ID.
    fn message_box(&self, req: &MessageRequest) -> i32;

    /// `GetOpenFileNameW` or `GetSaveFileNameW` depending on `req.mode`.
    /// On success the chosen path has been written into `req.file`.
    fn file_dialog(&self, req: &mut FileRequest) -> bool;

    /// `CommDlgExtendedError`, read right after a failed `file_dialog`.
    fn extended_error(&self) -> u32;

    /// `SHBrowseForFolderW` + `SHGetPathFromIDListW`.  `None` on cancel.
    fn browse_for_folder(&self, req: &BrowseRequest) -> Option<PathBuf>;
}

// ── Browse callback ───────────────────────────────────────────────────────────

/// Something that can deliver a window message (`SendMessageW`).
pub(crate) trait MessageSink {
    fn send_message(&mut self, hwnd: WindowHandle, msg: u32, wparam: usize, lparam: isize) -> isize;
}

/// Body of the `BFFCALLBACK` installed when a start directory is set.
///
/// On `BFFM_INITIALIZED` it asks the dialog to select the path whose UTF-16
/// pointer was stashed in `lpdata` (`wParam = TRUE`: lParam is a path, not a
/// PIDL).  Every event returns 0.
pub(crate) fn on_browse_event<S: MessageSink + ?Sized>(
    sink: &mut S,
    hwnd: WindowHandle,
    msg: u32,
    lpdata: isize,
) -> i32 {
    if msg == BFFM_INITIALIZED {
        let _ = sink.send_message(hwnd, BFFM_SETSELECTIONW, 1, lpdata);
    }
    0
}

// ── Adapters ──────────────────────────────────────────────────────────────────

/// Show a message box and return the pressed button.
pub(crate) fn show_message<B: Backend + ?Sized>(backend: &B, req: &MessageRequest) -> i32 {
    backend.message_box(req)
}

/// Show a Yes/No message box; `true` iff the user chose Yes.
pub(crate) fn confirm<B: Backend + ?Sized>(backend: &B, req: &MessageRequest) -> bool {
    show_message(backend, req) == IDYES
}

/// Map `CommDlgExtendedError` to a dialog error.  Zero means the user
/// cancelled; anything else is a genuine failure.
pub(crate) fn translate_error(code: u32) -> DialogError {
    if code == 0 {
        debug!("file dialog cancelled by user");
        DialogError::Cancelled
    } else {
        error!("file dialog failed, CommDlgExtendedError = {code:#x}");
        DialogError::CommDlg(code)
    }
}

/// Run an open/save dialog and decode the result.
pub(crate) fn run_file_dialog<B: Backend + ?Sized>(
    backend: &B,
    mut req: FileRequest,
) -> Result<PathBuf> {
    if backend.file_dialog(&mut req) {
        let path = req.filename();
        debug!("{:?} dialog returned {path:?}", req.mode);
        Ok(path)
    } else {
        Err(translate_error(backend.extended_error()))
    }
}

/// Run a folder browse.  There is no extended-error query here: a null
/// result is always reported as a cancel.
pub(crate) fn run_browse<B: Backend + ?Sized>(backend: &B, req: &BrowseRequest) -> Result<PathBuf> {
    match backend.browse_for_folder(req) {
        Some(path) => {
            debug!("directory dialog returned {path:?}");
            Ok(path)
        }
        None => {
            debug!("directory dialog cancelled by user");
            Err(DialogError::Cancelled)
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::request::{FileMode, MessageKind};
    use crate::testing::{MockBackend, RecordingSink};

    fn file_req(mode: FileMode) -> FileRequest {
        FileRequest::new(mode, WindowHandle(7), "start.txt", None, "", &[]).unwrap()
    }

    // ── message box ───────────────────────────────────────────────────────────

    #[test]
    fn confirm_true_only_for_yes() {
        let req = MessageRequest::new(WindowHandle::NULL, MessageKind::Confirm, "Quit?", "");
        // IDOK, IDCANCEL, IDABORT, IDYES, IDNO
        for (button, expected) in [(1, false), (2, false), (3, false), (6, true), (7, false)] {
            let mock = MockBackend::default().with_button(button);
            assert_eq!(confirm(&mock, &req), expected, "button {button}");
        }
    }

    #[test]
    fn message_box_receives_request() {
        let mock = MockBackend::default();
        let req = MessageRequest::new(WindowHandle(3), MessageKind::Error, "boom", "");
        show_message(&mock, &req);
        assert_eq!(mock.messages(), vec![req]);
    }

    // ── file dialog ───────────────────────────────────────────────────────────

    #[test]
    fn file_success_returns_buffer_contents() {
        let mock = MockBackend::default().with_file_result(Some(r"C:\out\edited.txt"));
        let path = run_file_dialog(&mock, file_req(FileMode::Save)).unwrap();
        assert_eq!(path, Path::new(r"C:\out\edited.txt"));
    }

    #[test]
    fn file_success_unedited_returns_start_file() {
        let mock = MockBackend::default().with_file_success();
        let path = run_file_dialog(&mock, file_req(FileMode::Open)).unwrap();
        assert_eq!(path, Path::new("start.txt"));
    }

    #[test]
    fn failure_with_zero_code_is_cancel() {
        let mock = MockBackend::default().with_file_result(None).with_extended_error(0);
        assert_eq!(
            run_file_dialog(&mock, file_req(FileMode::Open)),
            Err(DialogError::Cancelled)
        );
    }

    #[test]
    fn failure_with_code_is_wrapped() {
        let mock = MockBackend::default()
            .with_file_result(None)
            .with_extended_error(0x1234);
        let err = run_file_dialog(&mock, file_req(FileMode::Save)).unwrap_err();
        assert_eq!(err, DialogError::CommDlg(0x1234));
        assert_eq!(err.to_string(), "CommDlgExtendedError: 0x1234");
    }

    #[test]
    fn extended_error_not_queried_on_success() {
        let mock = MockBackend::default().with_file_success();
        run_file_dialog(&mock, file_req(FileMode::Open)).unwrap();
        assert_eq!(mock.extended_error_queries(), 0);
    }

    #[test]
    fn extended_error_queried_once_on_failure() {
        let mock = MockBackend::default().with_file_result(None);
        let _ = run_file_dialog(&mock, file_req(FileMode::Open));
        assert_eq!(mock.extended_error_queries(), 1);
    }

    // ── folder browse ─────────────────────────────────────────────────────────

    #[test]
    fn browse_null_result_is_cancel() {
        let mock = MockBackend::default().with_folder(None);
        let req = BrowseRequest::new(WindowHandle::NULL, None, "").unwrap();
        assert_eq!(run_browse(&mock, &req), Err(DialogError::Cancelled));
    }

    #[test]
    fn browse_returns_path() {
        let mock = MockBackend::default().with_folder(Some(r"E:\photos"));
        let req = BrowseRequest::new(WindowHandle::NULL, None, "").unwrap();
        assert_eq!(run_browse(&mock, &req), Ok(PathBuf::from(r"E:\photos")));
    }

    // ── callback ──────────────────────────────────────────────────────────────

    #[test]
    fn callback_selects_start_dir_once_on_init() {
        let req =
            BrowseRequest::new(WindowHandle(1), Some(Path::new(r"C:\start")), "").unwrap();
        let lpdata = req.start_dir.as_ref().unwrap().as_ptr() as isize;
        let mut sink = RecordingSink::default();

        assert_eq!(on_browse_event(&mut sink, WindowHandle(42), BFFM_INITIALIZED, lpdata), 0);

        assert_eq!(sink.sent, vec![(WindowHandle(42), BFFM_SETSELECTIONW, 1, lpdata)]);
    }

    #[test]
    fn callback_ignores_other_events() {
        let mut sink = RecordingSink::default();
        // BFFM_SELCHANGED, BFFM_VALIDATEFAILEDW
        for msg in [2, 4] {
            assert_eq!(on_browse_event(&mut sink, WindowHandle(42), msg, 99), 0);
        }
        assert!(sink.sent.is_empty());
    }
}

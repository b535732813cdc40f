// ── Common dialogs ─────────────────────────────────────────────────────────────
//
// Thin wrappers around MessageBoxW, the comdlg32 open/save dialogs and the
// shell folder browser.  Each takes a request value that already owns every
// buffer the native structure points into; nothing here allocates strings.
//
// This is inside `platform::win32` so `unsafe` is permitted per crate policy.

#![allow(unsafe_code)]

use std::ffi::c_void;
use std::path::PathBuf;

use log::warn;
use windows::{
    core::{PCWSTR, PWSTR},
    Win32::{
        Foundation::{HWND, LPARAM, MAX_PATH, WPARAM},
        System::Com::{CoInitializeEx, CoTaskMemFree, CoUninitialize, COINIT_APARTMENTTHREADED},
        UI::{
            Controls::Dialogs::{
                CommDlgExtendedError, GetOpenFileNameW, GetSaveFileNameW, OFN_FILEMUSTEXIST,
                OFN_NOCHANGEDIR, OFN_OVERWRITEPROMPT, OPENFILENAMEW, OPEN_FILENAME_FLAGS,
            },
            Shell::{
                SHBrowseForFolderW, SHGetPathFromIDListW, BFFM_INITIALIZED, BFFM_SETSELECTIONW,
                BIF_NEWDIALOGSTYLE, BIF_RETURNONLYFSDIRS, BROWSEINFOW,
            },
            WindowsAndMessaging::{
                MessageBoxW, SendMessageW, IDYES, MB_ICONERROR, MB_ICONINFORMATION, MB_OK,
                MB_YESNO, MESSAGEBOX_STYLE,
            },
        },
    },
};

use super::window::to_hwnd;
use crate::backend::{self, MessageSink, WindowHandle};
use crate::request::{self, BrowseRequest, FileMode, FileRequest, MessageRequest};
use crate::wide;

// The request module re-declares these so it can be tested off-Windows.
const _: () = {
    assert!(OFN_FILEMUSTEXIST.0 == request::OFN_FILEMUSTEXIST);
    assert!(OFN_OVERWRITEPROMPT.0 == request::OFN_OVERWRITEPROMPT);
    assert!(OFN_NOCHANGEDIR.0 == request::OFN_NOCHANGEDIR);
    assert!(MB_OK.0 == request::MB_OK);
    assert!(MB_YESNO.0 == request::MB_YESNO);
    assert!(MB_ICONERROR.0 == request::MB_ICONERROR);
    assert!(MB_ICONINFORMATION.0 == request::MB_ICONINFORMATION);
    assert!(IDYES.0 == request::IDYES);
    assert!(BIF_RETURNONLYFSDIRS == request::BIF_RETURNONLYFSDIRS);
    assert!(BIF_NEWDIALOGSTYLE == request::BIF_NEWDIALOGSTYLE);
    assert!(BFFM_INITIALIZED == request::BFFM_INITIALIZED);
    assert!(BFFM_SETSELECTIONW == request::BFFM_SETSELECTIONW);
};

/// Null for an absent buffer, else a pointer to its first unit.
fn opt_pcwstr(buf: Option<&[u16]>) -> PCWSTR {
    buf.map_or(PCWSTR::null(), |b| PCWSTR(b.as_ptr()))
}

// ── Message box ───────────────────────────────────────────────────────────────

pub(crate) fn message_box(req: &MessageRequest) -> i32 {
    // SAFETY: text and caption are null-terminated UTF-16 buffers owned by
    // `req`, which outlives this blocking call.  A null owner is permitted.
    let ret = unsafe {
        MessageBoxW(
            to_hwnd(req.owner),
            PCWSTR(req.text.as_ptr()),
            PCWSTR(req.caption.as_ptr()),
            MESSAGEBOX_STYLE(req.style),
        )
    };
    ret.0
}

// ── Open / save ───────────────────────────────────────────────────────────────

pub(crate) fn file_dialog(req: &mut FileRequest) -> bool {
    let max_file = req.max_file();

    let mut ofn = OPENFILENAMEW {
        lStructSize: std::mem::size_of::<OPENFILENAMEW>() as u32,
        hwndOwner: to_hwnd(req.owner),
        lpstrFilter: opt_pcwstr(req.filter.as_deref()),
        lpstrFile: PWSTR(req.file.as_mut_ptr()),
        nMaxFile: max_file,
        lpstrInitialDir: opt_pcwstr(req.initial_dir.as_deref()),
        lpstrTitle: opt_pcwstr(req.title.as_deref()),
        Flags: OPEN_FILENAME_FLAGS(req.flags),
        ..Default::default()
    };

    // SAFETY: `ofn` is fully initialised and every pointer in it refers to a
    // buffer owned by `req`, which is not touched until the call returns.
    // `nMaxFile` is the exact length of the file buffer, so the dialog writes
    // only within it.  The call is modal and blocks this thread.
    let ok = unsafe {
        match req.mode {
            FileMode::Open => GetOpenFileNameW(&mut ofn),
            FileMode::Save => GetSaveFileNameW(&mut ofn),
        }
    };
    ok.as_bool()
}

pub(crate) fn extended_error() -> u32 {
    // SAFETY: reads comdlg32's per-thread error state; always safe to call.
    unsafe { CommDlgExtendedError() }.0
}

// ── Folder browse ─────────────────────────────────────────────────────────────

/// Balances a successful `CoInitializeEx` on the current thread.
///
/// `BIF_NEWDIALOGSTYLE` hosts COM controls, so the thread needs an apartment.
/// If the caller already initialised COM in another mode the call fails with
/// `RPC_E_CHANGED_MODE`; the dialog still works and there is nothing to undo.
struct ComApartment {
    initialized: bool,
}

impl ComApartment {
    fn enter() -> Self {
        // SAFETY: reserved pointer is None as documented.  S_FALSE (already
        // initialised) still counts and must be balanced.
        let hr = unsafe { CoInitializeEx(None, COINIT_APARTMENTTHREADED) };
        Self {
            initialized: hr.is_ok(),
        }
    }
}

impl Drop for ComApartment {
    fn drop(&mut self) {
        if self.initialized {
            // SAFETY: paired with the successful CoInitializeEx in `enter`.
            unsafe { CoUninitialize() };
        }
    }
}

struct Win32Sink;

impl MessageSink for Win32Sink {
    fn send_message(&mut self, hwnd: WindowHandle, msg: u32, wparam: usize, lparam: isize) -> isize {
        // SAFETY: hwnd is the live browse dialog handed to the callback;
        // lparam points at the start-directory buffer held by the request.
        unsafe { SendMessageW(to_hwnd(hwnd), msg, WPARAM(wparam), LPARAM(lparam)) }.0
    }
}

// SAFETY: installed as BROWSEINFOW::lpfn only while the owning
// `BrowseRequest` is borrowed for the SHBrowseForFolderW call, so `lpdata`
// (its start-directory pointer) is valid for every invocation.
unsafe extern "system" fn browse_callback(
    hwnd: HWND,
    msg: u32,
    _lparam: LPARAM,
    lpdata: LPARAM,
) -> i32 {
    let handle = WindowHandle(hwnd.0 as isize);
    backend::on_browse_event(&mut Win32Sink, handle, msg, lpdata.0)
}

pub(crate) fn browse_for_folder(req: &BrowseRequest) -> Option<PathBuf> {
    let mut bi = BROWSEINFOW {
        hwndOwner: to_hwnd(req.owner),
        lpszTitle: opt_pcwstr(req.title.as_deref()),
        ulFlags: req.flags,
        ..Default::default()
    };
    if let Some(dir) = &req.start_dir {
        bi.lpfn = Some(browse_callback);
        bi.lParam = LPARAM(dir.as_ptr() as isize);
    }

    let _com = ComApartment::enter();

    // SAFETY: `bi` is fully initialised; the title and start-directory
    // buffers belong to `req`, which outlives this blocking call.
    let pidl = unsafe { SHBrowseForFolderW(&bi) };
    if pidl.is_null() {
        return None;
    }

    let mut buf = [0u16; MAX_PATH as usize];
    // SAFETY: pidl is a non-null PIDL just returned by the shell; buf has the
    // MAX_PATH capacity the API requires.
    let ok = unsafe { SHGetPathFromIDListW(pidl, &mut buf) };
    // SAFETY: the shell allocates the returned PIDL with the COM task
    // allocator and hands ownership to us; it is not used after this.
    unsafe { CoTaskMemFree(Some(pidl as *const c_void)) };

    if !ok.as_bool() {
        warn!("directory dialog: selection has no filesystem path");
    }
    Some(wide::path_from_wide(&buf))
}

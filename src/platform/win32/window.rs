// ── Owner window ──────────────────────────────────────────────────────────────
//
// Dialogs are parented to the foreground window rather than
// `GetActiveWindow`, which only sees windows owned by the calling thread.
// A library caller usually runs its dialogs from a worker thread, so the
// thread-local answer is often null.  The cost is that the foreground window
// may belong to another process if the user switched away.

#![allow(unsafe_code)]

use std::ffi::c_void;

use windows::Win32::{Foundation::HWND, UI::WindowsAndMessaging::GetForegroundWindow};

use crate::backend::WindowHandle;

/// The window the user is currently working in, or null.
pub(crate) fn foreground_window() -> WindowHandle {
    // SAFETY: GetForegroundWindow takes no arguments and cannot fail; it
    // returns null when no window has focus (e.g. during activation changes).
    let hwnd = unsafe { GetForegroundWindow() };
    WindowHandle(hwnd.0 as isize)
}

/// Convert an opaque handle back into an `HWND`.
pub(crate) fn to_hwnd(handle: WindowHandle) -> HWND {
    HWND(handle.0 as *mut c_void)
}

// ── Native request values ─────────────────────────────────────────────────────
//
// One request value is built per dialog call and dropped when the call
// returns.  Each owns every UTF-16 buffer that the corresponding Win32
// structure (MessageBoxW arguments, OPENFILENAMEW, BROWSEINFOW) points into,
// so the buffers outlive the native call by construction.
//
// No Win32 imports; the flag values below are the documented Win32 values
// and are checked against the `windows` crate in `platform::win32::dialogs`.

use std::path::{Path, PathBuf};

use log::warn;

use crate::backend::WindowHandle;
use crate::builder::FileFilter;
use crate::error::Result;
use crate::wide;

// ── Win32 constants ───────────────────────────────────────────────────────────

pub const OFN_OVERWRITEPROMPT: u32 = 0x0000_0002;
pub const OFN_NOCHANGEDIR: u32 = 0x0000_0008;
pub const OFN_FILEMUSTEXIST: u32 = 0x0000_1000;

pub const MB_OK: u32 = 0x0000_0000;
pub const MB_YESNO: u32 = 0x0000_0004;
pub const MB_ICONERROR: u32 = 0x0000_0010;
pub const MB_ICONINFORMATION: u32 = 0x0000_0040;

/// `MessageBoxW` return value for the Yes button.
pub const IDYES: i32 = 6;

pub const BIF_RETURNONLYFSDIRS: u32 = 0x0000_0001;
pub const BIF_NEWDIALOGSTYLE: u32 = 0x0000_0040;

const WM_USER: u32 = 0x0400;

/// Browse callback event: the dialog finished initializing.
pub const BFFM_INITIALIZED: u32 = 1;
/// Browse message: select the path passed in `lParam` (UTF-16 pointer).
pub const BFFM_SETSELECTIONW: u32 = WM_USER + 103;

/// Maximum path length in `WCHAR`s, including the null terminator.
/// `MAX_PATH` (260) is too short for modern Windows paths; use 32 768 which
/// is the documented maximum for `\\?\` extended paths.
pub(crate) const PATH_BUF_LEN: usize = 32_768;

/// An empty start directory counts as none: no initial dir, no callback.
fn non_empty(dir: Option<&Path>) -> Option<&Path> {
    dir.filter(|d| !d.as_os_str().is_empty())
}

// ── Message box ───────────────────────────────────────────────────────────────

/// Which message box to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// Yes/No question.
    Confirm,
    /// Single OK button with the information icon.
    Info,
    /// Single OK button with the error icon.
    Error,
}

impl MessageKind {
    /// Caption used when the builder has no title.
    pub fn default_title(self) -> &'static str {
        match self {
            Self::Confirm => "Confirm?",
            Self::Info => "Information",
            Self::Error => "Error",
        }
    }

    /// `uType` flags for `MessageBoxW`.
    pub fn style(self) -> u32 {
        match self {
            Self::Confirm => MB_YESNO,
            Self::Info => MB_OK | MB_ICONINFORMATION,
            Self::Error => MB_OK | MB_ICONERROR,
        }
    }
}

/// Pick the caption: the builder title if set, else the kind's default.
pub(crate) fn caption_for(kind: MessageKind, title: &str) -> &str {
    if title.is_empty() {
        kind.default_title()
    } else {
        title
    }
}

/// Arguments for one `MessageBoxW` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRequest {
    pub owner: WindowHandle,
    /// Null-terminated message text.
    pub text: Vec<u16>,
    /// Null-terminated caption.
    pub caption: Vec<u16>,
    pub style: u32,
}

impl MessageRequest {
    /// Marshal a message box.  Never fails: strings with an interior NUL are
    /// cut where the native call would stop reading anyway.
    pub(crate) fn new(owner: WindowHandle, kind: MessageKind, text: &str, title: &str) -> Self {
        let (text, cut_text) = wide::to_wide_truncated(text);
        let (caption, cut_caption) = wide::to_wide_truncated(caption_for(kind, title));
        if cut_text || cut_caption {
            warn!("message box text truncated at an interior NUL");
        }
        Self {
            owner,
            text,
            caption,
            style: kind.style(),
        }
    }
}

// ── Open / save ───────────────────────────────────────────────────────────────

/// Which common file dialog to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileMode {
    /// `GetOpenFileNameW`.
    Open,
    /// `GetSaveFileNameW`.
    Save,
}

impl FileMode {
    /// `OPENFILENAMEW::Flags` for this mode.  Both modes leave the process
    /// working directory alone.
    pub fn flags(self) -> u32 {
        match self {
            Self::Open => OFN_FILEMUSTEXIST | OFN_NOCHANGEDIR,
            Self::Save => OFN_OVERWRITEPROMPT | OFN_NOCHANGEDIR,
        }
    }
}

/// The buffers behind one `OPENFILENAMEW`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRequest {
    pub mode: FileMode,
    pub owner: WindowHandle,
    /// `lpstrFile`: start file, then zero padding.  The dialog writes the
    /// chosen path back into it.
    pub file: Vec<u16>,
    pub flags: u32,
    /// `lpstrInitialDir`, null-terminated.
    pub initial_dir: Option<Vec<u16>>,
    /// `lpstrTitle`, null-terminated.
    pub title: Option<Vec<u16>>,
    /// `lpstrFilter`, double-null-terminated.
    pub filter: Option<Vec<u16>>,
}

impl FileRequest {
    pub(crate) fn new(
        mode: FileMode,
        owner: WindowHandle,
        start_file: &str,
        start_dir: Option<&Path>,
        title: &str,
        filters: &[FileFilter],
    ) -> Result<Self> {
        let mut file = wide::to_wide(start_file, "start_file")?;
        if file.len() < PATH_BUF_LEN {
            file.resize(PATH_BUF_LEN, 0);
        }

        let initial_dir = non_empty(start_dir)
            .map(|dir| wide::path_to_wide(dir, "start_dir"))
            .transpose()?;

        let title = if title.is_empty() {
            None
        } else {
            Some(wide::to_wide(title, "title")?)
        };

        Ok(Self {
            mode,
            owner,
            file,
            flags: mode.flags(),
            initial_dir,
            title,
            filter: wide::encode_filters(filters)?,
        })
    }

    /// `nMaxFile`: capacity of the file buffer in `WCHAR`s.
    pub fn max_file(&self) -> u32 {
        u32::try_from(self.file.len()).unwrap_or(u32::MAX)
    }

    /// The path currently in the file buffer.
    pub fn filename(&self) -> PathBuf {
        wide::path_from_wide(&self.file)
    }
}

// ── Folder browse ─────────────────────────────────────────────────────────────

/// The buffers behind one `BROWSEINFOW`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseRequest {
    pub owner: WindowHandle,
    /// `lpszTitle`, null-terminated.
    pub title: Option<Vec<u16>>,
    pub flags: u32,
    /// Directory to preselect, null-terminated.  Its pointer becomes the
    /// browse callback's `lpData`; the callback is installed iff this is set.
    pub start_dir: Option<Vec<u16>>,
}

impl BrowseRequest {
    pub(crate) fn new(owner: WindowHandle, start_dir: Option<&Path>, title: &str) -> Result<Self> {
        // A title that cannot be encoded is dropped, not reported.
        let title = if title.is_empty() {
            None
        } else {
            match wide::to_wide(title, "title") {
                Ok(t) => Some(t),
                Err(e) => {
                    warn!("directory dialog: dropping title: {e}");
                    None
                }
            }
        };

        let start_dir = non_empty(start_dir)
            .map(|dir| wide::path_to_wide(dir, "start_dir"))
            .transpose()?;

        Ok(Self {
            owner,
            title,
            flags: BIF_RETURNONLYFSDIRS | BIF_NEWDIALOGSTYLE,
            start_dir,
        })
    }

    /// Whether the native call needs the preselection callback.
    pub fn wants_callback(&self) -> bool {
        self.start_dir.is_some()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

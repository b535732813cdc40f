// ── Safety policy ────────────────────────────────────────────────────────────
// Unsafe code is forbidden everywhere except `platform::win32` (Win32 FFI).
// Each unsafe block in that module MUST carry a `// SAFETY:` comment.
#![deny(unsafe_code)]

//! Native dialogs behind a small builder API.
//!
//! ```no_run
//! # #[cfg(windows)]
//! # fn demo() -> dialog::Result<()> {
//! if dialog::message("Overwrite the existing file?").yes_no() {
//!     let path = dialog::file()
//!         .title("Export")
//!         .filter("Music File", ["mp3", "ogg", "wav"])
//!         .set_start_file("mix.ogg")
//!         .save()?;
//!     dialog::message(format!("Saved to {}", path.display())).info();
//! }
//! let folder = dialog::directory().set_start_dir(r"C:\Users").browse()?;
//! # let _ = folder;
//! # Ok(())
//! # }
//! ```
//!
//! Every dialog blocks the calling thread until the user answers.  A
//! dismissed file or folder dialog is reported as [`DialogError::Cancelled`],
//! distinct from [`DialogError::CommDlg`], which carries the raw
//! `CommDlgExtendedError` code.
//!
//! The plain terminal operations (`yes_no`, `load`, `browse`, …) exist on
//! Windows.  Each has a `*_with` twin that runs against any [`Backend`].

mod backend;
mod builder;
mod error;
mod request;
mod wide;

pub mod platform;

#[cfg(test)]
mod testing;

pub use backend::{Backend, WindowHandle};
pub use builder::{
    directory, file, message, DirectoryBuilder, FileBuilder, FileFilter, MsgBuilder, Owner,
};
pub use error::{DialogError, Result};
pub use request::{BrowseRequest, FileMode, FileRequest, MessageKind, MessageRequest};

// ── UTF-16 marshaling ─────────────────────────────────────────────────────────
//
// The `*W` Win32 dialog APIs take UTF-16 buffers in three shapes:
//   • null-terminated strings (titles, initial directory, start file),
//   • unterminated runs that get concatenated into a larger buffer,
//   • double-null-terminated multi-string lists (the filter list).
// No Win32 imports; pure Rust so it can be tested on any host.

use std::path::{Path, PathBuf};

use crate::builder::FileFilter;
use crate::error::{DialogError, Result};

/// Encode `s` as a null-terminated UTF-16 buffer.
///
/// Fails if `s` contains an interior NUL: the native side would silently
/// stop reading there, so the request is rejected instead.
pub(crate) fn to_wide(s: &str, field: &'static str) -> Result<Vec<u16>> {
    if s.contains('\0') {
        return Err(DialogError::Encoding { field });
    }
    Ok(s.encode_utf16().chain(std::iter::once(0)).collect())
}

/// Encode `path` as a null-terminated UTF-16 buffer.
///
/// On Windows the path's own UTF-16 units are used, so names holding
/// unpaired surrogates survive.  Elsewhere the path must be valid Unicode.
#[cfg(windows)]
pub(crate) fn path_to_wide(path: &Path, field: &'static str) -> Result<Vec<u16>> {
    use std::os::windows::ffi::OsStrExt;

    let mut units: Vec<u16> = path.as_os_str().encode_wide().collect();
    if units.contains(&0) {
        return Err(DialogError::Encoding { field });
    }
    units.push(0);
    Ok(units)
}

#[cfg(not(windows))]
pub(crate) fn path_to_wide(path: &Path, field: &'static str) -> Result<Vec<u16>> {
    let s = path.to_str().ok_or(DialogError::Encoding { field })?;
    to_wide(s, field)
}

/// Encode `s` without a terminator, for splicing into a larger buffer.
pub(crate) fn to_wide_unterminated(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

/// Encode `s` as a null-terminated UTF-16 buffer, cutting it at the first
/// interior NUL.  Returns the buffer and whether anything was cut.
pub(crate) fn to_wide_truncated(s: &str) -> (Vec<u16>, bool) {
    let (head, cut) = match s.find('\0') {
        Some(i) => (&s[..i], true),
        None => (s, false),
    };
    (head.encode_utf16().chain(std::iter::once(0)).collect(), cut)
}

/// The units of `buf` before its first NUL (all of it if unterminated).
fn until_nul(buf: &[u16]) -> &[u16] {
    let len = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
    &buf[..len]
}

/// Decode a null-terminated (or unterminated) UTF-16 buffer for display.
#[cfg(test)]
pub(crate) fn from_wide(buf: &[u16]) -> String {
    String::from_utf16_lossy(until_nul(buf))
}

/// Decode a path written by the native side into a null-terminated buffer.
///
/// On Windows this is lossless (`OsString::from_wide`); elsewhere unpaired
/// surrogates become U+FFFD.
pub(crate) fn path_from_wide(buf: &[u16]) -> PathBuf {
    #[cfg(windows)]
    {
        use std::os::windows::ffi::OsStringExt;
        PathBuf::from(std::ffi::OsString::from_wide(until_nul(buf)))
    }
    #[cfg(not(windows))]
    {
        PathBuf::from(String::from_utf16_lossy(until_nul(buf)))
    }
}

/// Build the `lpstrFilter` buffer for an open/save dialog.
///
/// Each filter contributes `desc\0`, then `*.ext;\0` per extension, then a
/// closing `\0`; the whole list ends with two more NULs.  Returns `None` when
/// there are no filters so the native pointer stays null.
pub(crate) fn encode_filters(filters: &[FileFilter]) -> Result<Option<Vec<u16>>> {
    if filters.is_empty() {
        return Ok(None);
    }

    let mut buf = Vec::new();
    for filter in filters {
        if filter.desc.contains('\0') {
            return Err(DialogError::Encoding { field: "filter" });
        }
        buf.extend(to_wide_unterminated(&filter.desc));
        buf.push(0);
        for ext in &filter.extensions {
            if ext.contains('\0') {
                return Err(DialogError::Encoding { field: "filter" });
            }
            buf.extend(to_wide_unterminated(&format!("*.{ext};")));
            buf.push(0);
        }
        buf.push(0);
    }
    buf.extend([0, 0]);
    Ok(Some(buf))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

// ── Central error type ────────────────────────────────────────────────────────
//
// Every fallible dialog returns `error::Result<T>`.  Only two things can go
// wrong at the native boundary: the user dismissed the dialog, or the common
// dialog library reported an extended error.  A third variant covers strings
// that cannot be marshaled into the native structures at all.

use thiserror::Error;

/// Every error a dialog can produce.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DialogError {
    /// The user closed or cancelled the dialog.  Not a failure as such;
    /// callers usually branch on it rather than report it.
    #[error("Cancelled")]
    Cancelled,

    /// The dialog call failed and `CommDlgExtendedError` returned this code.
    /// The value is kept verbatim so it can be looked up in the Win32 docs.
    #[error("CommDlgExtendedError: {0:#x}")]
    CommDlg(u32),

    /// A string could not be represented as a null-terminated UTF-16 buffer
    /// (interior NUL, or a path that is not valid Unicode).
    #[error("{field} cannot be encoded for a native dialog")]
    Encoding {
        /// The builder option that failed, e.g. `"start_dir"`.
        field: &'static str,
    },
}

impl DialogError {
    /// `true` when the user dismissed the dialog.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DialogError>;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extended_error_renders_hex_code() {
        assert_eq!(
            DialogError::CommDlg(0x1234).to_string(),
            "CommDlgExtendedError: 0x1234"
        );
        assert_eq!(
            DialogError::CommDlg(0xFFFF).to_string(),
            "CommDlgExtendedError: 0xffff"
        );
    }

    #[test]
    fn cancelled_is_distinct_from_failures() {
        assert!(DialogError::Cancelled.is_cancelled());
        assert!(!DialogError::CommDlg(1).is_cancelled());
        assert!(!DialogError::Encoding { field: "title" }.is_cancelled());
    }

    #[test]
    fn encoding_error_names_the_field() {
        let e = DialogError::Encoding { field: "start_dir" };
        assert_eq!(e.to_string(), "start_dir cannot be encoded for a native dialog");
    }
}

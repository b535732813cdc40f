// ── Platform layer ────────────────────────────────────────────────────────────
//
// Native `Backend` implementations.  No `unsafe` lives here; all Win32 FFI is
// confined to the `win32` sub-module and never leaks outward.  Other targets
// have no native backend; callers pass their own to the `*_with` operations.

#[cfg(windows)]
pub mod win32;

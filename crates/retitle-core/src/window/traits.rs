//! Window backend trait definition.

use crate::window::{errors::WindowError, types::WindowHandle};

/// Trait defining the interface for native window backends.
///
/// Each supported platform (X11, Win32) implements this trait to locate
/// editor windows by their current title and to rewrite that title.
pub trait WindowBackend: Send + Sync {
    /// The canonical name of this backend (e.g., "x11", "win32").
    fn name(&self) -> &'static str;

    /// The display name for this backend (e.g., "X11 (xdotool)").
    fn display_name(&self) -> &'static str;

    /// Check if this backend can operate on the current system.
    fn is_available(&self) -> bool;

    /// One-time setup before the first `find_windows` call.
    ///
    /// The X11 backend regenerates its helper script here; Win32 has
    /// nothing to set up. Safe to call more than once.
    fn prepare(&self) -> Result<(), WindowError>;

    /// Find every open window whose current title ends with `official_title`.
    ///
    /// # Returns
    /// * `Ok(handles)` - zero, one, or many matches; all are valid outcomes
    /// * `Err(WindowError)` - the enumeration itself failed
    fn find_windows(&self, official_title: &str) -> Result<Vec<WindowHandle>, WindowError>;

    /// Set the title of one window.
    ///
    /// Failure (window closed mid-operation, permission denied) is reported
    /// to the caller, never escalated; the caller decides whether to log
    /// and move on.
    fn set_title(&self, handle: WindowHandle, new_title: &str) -> Result<(), WindowError>;
}

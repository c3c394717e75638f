//! View state and rename plan types.
//!
//! A [`ViewSnapshot`] is the read-only picture of one editor view that the
//! host hands to the engine on every event. The engine never reaches back
//! into the host; everything it needs must be in the snapshot.

use std::fmt;

/// Host-assigned identifier for one OS window.
///
/// Stable for the lifetime of that window and used only as a cache key,
/// never dereferenced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u64);

impl From<u64> for WindowId {
    fn from(id: u64) -> Self {
        WindowId(id)
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable snapshot of one editor view, supplied fresh on every event.
///
/// Paths are kept as the strings the host reports; the engine works on them
/// lexically and never touches the filesystem.
#[derive(Debug, Clone, Default)]
pub struct ViewSnapshot {
    /// Window the view lives in.
    pub window_id: WindowId,
    /// Host-assigned display name, which wins over any computed path.
    pub name: Option<String>,
    /// Absolute path of the backing file, absent for never-saved buffers.
    pub file_path: Option<String>,
    /// Whether the buffer has unsaved changes.
    pub is_dirty: bool,
    /// Path of the project file the window has open, if any.
    pub project_path: Option<String>,
    /// Folders open in the window; the first one is the project root.
    pub folders: Vec<String>,
}

impl ViewSnapshot {
    pub fn new(window_id: WindowId) -> Self {
        Self {
            window_id,
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_file(mut self, path: impl Into<String>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    pub fn with_project_file(mut self, path: impl Into<String>) -> Self {
        self.project_path = Some(path.into());
        self
    }

    pub fn with_folder(mut self, folder: impl Into<String>) -> Self {
        self.folders.push(folder.into());
        self
    }

    pub fn dirty(mut self, is_dirty: bool) -> Self {
        self.is_dirty = is_dirty;
        self
    }

    /// Display name of the project the view belongs to.
    ///
    /// The project file's base name without its extension, falling back to
    /// the base name of the first open folder. Empty string means "no
    /// project", mirroring how the host reports the absence of one.
    pub fn project_name(&self) -> String {
        let source = self
            .project_path
            .as_deref()
            .filter(|p| !p.is_empty())
            .or_else(|| self.folders.first().map(String::as_str))
            .unwrap_or("");
        if source.is_empty() {
            return String::new();
        }
        strip_extension(base_name(source)).to_string()
    }
}

/// Final path component, splitting on both separator styles.
pub(crate) fn base_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Everything before the final separator; empty when there is none.
pub(crate) fn parent_portion(path: &str) -> &str {
    match path.rfind(['/', '\\']) {
        Some(idx) => &path[..idx],
        None => "",
    }
}

/// Base name minus a trailing `.ext`. A leading dot alone is not an
/// extension, so dotfiles pass through unchanged.
fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    }
}

/// Titles computed for one event: the search key and the replacement.
///
/// Transient; recomputed fresh per event and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePlan {
    /// Deterministic title the host itself would show; used only as the
    /// suffix key to locate the OS window.
    pub official_title: String,
    /// User-configured title actually written to the window.
    pub new_title: String,
}

//! Per-window cache of resolved native window handles.

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::debug;

use crate::title::types::WindowId;
use crate::window::types::WindowHandle;

/// Maps host window ids to the native handle a unique title search produced.
///
/// An entry is written only when a search returned exactly one match, and
/// is never evicted; once cached, a handle is trusted for the rest of the
/// process. OS windows can close and identifiers can be reused, so a
/// cached handle may go stale. That gap is kept as-is: there is no
/// portable way to verify handle liveness, and the cost of a stale entry
/// is a rename landing on a dead window.
pub struct WindowIdentityCache {
    entries: Mutex<HashMap<WindowId, WindowHandle>>,
}

impl WindowIdentityCache {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Look up the cached handle for a window, if one was ever resolved.
    pub fn get(&self, window_id: WindowId) -> Option<WindowHandle> {
        self.entries.lock().unwrap().get(&window_id).copied()
    }

    /// Record the handle a unique search match produced.
    pub fn insert(&self, window_id: WindowId, handle: WindowHandle) {
        debug!(
            event = "core.window.cache_stored",
            window_id = %window_id,
            handle = %handle
        );
        self.entries.lock().unwrap().insert(window_id, handle);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }
}

impl Default for WindowIdentityCache {
    fn default() -> Self {
        Self::new()
    }
}
